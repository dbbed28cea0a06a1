use alloy_primitives::{keccak256, B256, U256};
use alloy_rlp::{BufMut, Encodable, Header};

/// Accumulates heterogeneous RLP items and wraps them into one RLP list.
#[derive(Debug, Default, Clone)]
pub(crate) struct RlpList {
    payload: Vec<u8>,
}

impl RlpList {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends the RLP encoding of `value` to the list.
    pub(crate) fn push<T: Encodable + ?Sized>(&mut self, value: &T) -> &mut Self {
        value.encode(&mut self.payload);
        self
    }

    fn header(&self) -> Header {
        Header { list: true, payload_length: self.payload.len() }
    }

    /// Returns the encoded list.
    pub(crate) fn into_bytes(self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.length());
        self.encode(&mut out);
        out
    }
}

impl Encodable for RlpList {
    fn encode(&self, out: &mut dyn BufMut) {
        self.header().encode(out);
        out.put_slice(&self.payload);
    }

    fn length(&self) -> usize {
        self.header().length_with_payload()
    }
}

/// Hashes `rlp([payload, extra.., chain_id, 0, 0])`, the signing domain shared by the Kaia typed
/// transactions. `payload` is embedded as an RLP string.
pub(crate) fn signing_domain_hash(
    payload: &[u8],
    extra: Option<&dyn Encodable>,
    chain_id: U256,
) -> B256 {
    let mut list = RlpList::new();
    list.push(payload);
    if let Some(extra) = extra {
        list.push(extra);
    }
    list.push(&chain_id).push(&0u8).push(&0u8);
    keccak256(list.into_bytes())
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, Bytes};

    use super::*;

    #[test]
    fn test_rlp_list_matches_derived_encoding() {
        let mut list = RlpList::new();
        list.push(&1u64).push(&address!("00000000000000000000000000000000000000aa"));
        list.push(&Bytes::from_static(&[0x80]));

        let bytes = list.clone().into_bytes();
        assert_eq!(bytes.len(), list.length());
        // 1 + (1 + 20) + (1 + 1)
        assert_eq!(bytes[0], 0xc0 + 24);
        assert_eq!(bytes[1], 0x01);
        assert_eq!(bytes[2], 0x94);
        assert_eq!(&bytes[bytes.len() - 2..], &[0x81, 0x80]);
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(RlpList::new().into_bytes(), vec![0xc0]);
    }
}
