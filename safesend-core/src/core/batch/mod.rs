//! Transfer batch construction
//!
//! Turns a recipient and an ordered list of token selections into ERC20
//! `transfer` calls, and packs a batch for Safe's `MultiSendCallOnly`
//! contract when it has to travel as a single transaction.

use ethers::abi::{self, Token as AbiToken};

use crate::core::amounts::to_raw;
use crate::domain::entities::batch::{CallDescriptor, TransferBatch};
use crate::domain::entities::selection::TokenSelection;
use crate::shared::constants::{MULTI_SEND_OPERATION_CALL, MULTI_SEND_SELECTOR, TRANSFER_SELECTOR};
use crate::shared::error::SafeSendError;
use crate::shared::types::{Address, Bytes, SafeSendResult, U256};
use crate::shared::utils::{checksum_address, parse_address};

/// Builds transfer batches from token selections
pub struct TransferBatchBuilder;

impl TransferBatchBuilder {
    /// Build one `transfer(recipient, amount)` call per selection, in order.
    ///
    /// The recipient is validated before anything else, so a malformed
    /// address fails with `InvalidRecipient` whatever the selections hold.
    pub fn build(recipient: &str, selections: &[TokenSelection]) -> SafeSendResult<TransferBatch> {
        let recipient = parse_address(recipient)?;

        if selections.is_empty() {
            return Err(SafeSendError::EmptySelection);
        }

        let calls = selections
            .iter()
            .map(|selection| -> SafeSendResult<CallDescriptor> {
                let amount = to_raw(&selection.amount, selection.token.decimals).map_err(|e| match e {
                    SafeSendError::InvalidAmount(reason) => SafeSendError::invalid_amount(format!(
                        "{}: {}",
                        selection.token.symbol, reason
                    )),
                    other => other,
                })?;
                Ok(CallDescriptor::token_call(
                    selection.token.address,
                    encode_transfer(recipient, amount),
                ))
            })
            .collect::<SafeSendResult<Vec<_>>>()?;

        log::debug!(
            "Built transfer batch of {} calls to {}",
            calls.len(),
            checksum_address(&recipient)
        );
        Ok(TransferBatch::new(calls))
    }
}

/// ABI-encode `transfer(address,uint256)`
pub fn encode_transfer(recipient: Address, amount: U256) -> Bytes {
    let mut data = TRANSFER_SELECTOR.to_vec();
    data.extend(abi::encode(&[AbiToken::Address(recipient), AbiToken::Uint(amount)]));
    Bytes::from(data)
}

/// ABI-encode `multiSend(bytes)` for the whole batch.
///
/// Each call is packed as `operation (1) | to (20) | value (32) | data length (32) | data`.
pub fn encode_multi_send(batch: &TransferBatch) -> Bytes {
    let mut packed = Vec::with_capacity(batch.iter().map(|call| 85 + call.data.len()).sum());
    let mut word = [0u8; 32];

    for call in batch.iter() {
        packed.push(MULTI_SEND_OPERATION_CALL);
        packed.extend_from_slice(call.to.as_bytes());
        call.value.to_big_endian(&mut word);
        packed.extend_from_slice(&word);
        U256::from(call.data.len()).to_big_endian(&mut word);
        packed.extend_from_slice(&word);
        packed.extend_from_slice(&call.data);
    }

    let mut data = MULTI_SEND_SELECTOR.to_vec();
    data.extend(abi::encode(&[AbiToken::Bytes(packed)]));
    Bytes::from(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::token::Token;

    const RECIPIENT: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

    fn token(byte: u8, symbol: &str, decimals: u8) -> Token {
        Token {
            chain_id: 80094,
            address: Address::repeat_byte(byte),
            name: symbol.to_string(),
            symbol: symbol.to_string(),
            decimals,
            logo_uri: None,
            tags: None,
            extensions: None,
        }
    }

    #[test]
    fn test_transfer_calldata_layout() {
        let recipient = parse_address(RECIPIENT).unwrap();
        let data = encode_transfer(recipient, U256::from(2_500_000_000_000_000_000u128));

        let expected = format!(
            "a9059cbb{}5aaeb6053f3e94c9b9a09f33669435e7ef1beaed{}22b1c8c1227a0000",
            "0".repeat(24),
            "0".repeat(48)
        );
        assert_eq!(hex::encode(&data), expected);
        assert_eq!(data.len(), 4 + 32 + 32);
    }

    #[test]
    fn test_build_preserves_order() {
        let selections = vec![
            TokenSelection::new(token(0xaa, "AAA", 18), "2.5", false),
            TokenSelection::new(token(0xbb, "BBB", 6), "10", true),
        ];

        let batch = TransferBatchBuilder::build(RECIPIENT, &selections).unwrap();

        assert_eq!(batch.len(), 2);
        assert_eq!(batch.calls[0].to, Address::repeat_byte(0xaa));
        assert_eq!(batch.calls[1].to, Address::repeat_byte(0xbb));
        assert!(batch.iter().all(|call| call.value.is_zero()));

        let recipient = parse_address(RECIPIENT).unwrap();
        assert_eq!(
            batch.calls[0].data,
            encode_transfer(recipient, U256::from(2_500_000_000_000_000_000u128))
        );
        assert_eq!(batch.calls[1].data, encode_transfer(recipient, U256::from(10_000_000u64)));
    }

    #[test]
    fn test_build_rejects_invalid_recipient_first() {
        let bad_amount = vec![TokenSelection::new(token(0xaa, "AAA", 2), "1.234", false)];

        assert!(matches!(
            TransferBatchBuilder::build("not-an-address", &bad_amount),
            Err(SafeSendError::InvalidRecipient(_))
        ));
        assert!(matches!(
            TransferBatchBuilder::build("not-an-address", &[]),
            Err(SafeSendError::InvalidRecipient(_))
        ));
    }

    #[test]
    fn test_build_rejects_empty_selection() {
        assert_eq!(
            TransferBatchBuilder::build(RECIPIENT, &[]),
            Err(SafeSendError::EmptySelection)
        );
    }

    #[test]
    fn test_build_propagates_invalid_amount() {
        let selections = vec![
            TokenSelection::new(token(0xaa, "AAA", 18), "1", false),
            TokenSelection::new(token(0xbb, "USDC", 6), "0.0000001", false),
        ];

        match TransferBatchBuilder::build(RECIPIENT, &selections) {
            Err(SafeSendError::InvalidAmount(message)) => assert!(message.starts_with("USDC")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_multi_send_packing() {
        let selections = vec![
            TokenSelection::new(token(0xaa, "AAA", 18), "2.5", false),
            TokenSelection::new(token(0xbb, "BBB", 6), "10", false),
        ];
        let batch = TransferBatchBuilder::build(RECIPIENT, &selections).unwrap();

        let data = encode_multi_send(&batch);
        assert_eq!(&data[..4], &MULTI_SEND_SELECTOR);

        // offset word, then the packed length
        let packed_len = U256::from_big_endian(&data[36..68]).as_usize();
        assert_eq!(packed_len, 2 * (85 + 68));

        let packed = &data[68..68 + packed_len];
        assert_eq!(packed[0], MULTI_SEND_OPERATION_CALL);
        assert_eq!(&packed[1..21], Address::repeat_byte(0xaa).as_bytes());
        assert!(packed[21..53].iter().all(|b| *b == 0));
        assert_eq!(U256::from_big_endian(&packed[53..85]), U256::from(68u64));
        assert_eq!(&packed[85..153], &batch.calls[0].data[..]);
        assert_eq!(&packed[154..174], Address::repeat_byte(0xbb).as_bytes());

        // bytes argument is padded to a whole word
        assert_eq!((data.len() - 4) % 32, 0);
    }
}
