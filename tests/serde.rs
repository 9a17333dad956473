use byte_bitset::BitSet;
use serde_json::json;

#[test]
fn serializes_as_bit_count_and_hex() {
    let mut bits = BitSet::new(12).unwrap();
    bits.set(0).unwrap();
    bits.set(7).unwrap();
    bits.set(9).unwrap();

    let value = serde_json::to_value(&bits).unwrap();
    assert_eq!(value, json!({ "bit_count": 12, "bytes": "8102" }));

    let restored: BitSet = serde_json::from_value(value).unwrap();
    assert_eq!(restored, bits);
}

#[test]
fn rejects_invalid_documents() {
    let wrong_length = json!({ "bit_count": 12, "bytes": "81" });
    let err = serde_json::from_value::<BitSet>(wrong_length).unwrap_err();
    assert!(err.to_string().contains("12 bits need 2 bytes, got 1"));

    let zero_bits = json!({ "bit_count": 0, "bytes": "" });
    assert!(serde_json::from_value::<BitSet>(zero_bits).is_err());

    let not_hex = json!({ "bit_count": 8, "bytes": "xy" });
    let err = serde_json::from_value::<BitSet>(not_hex).unwrap_err();
    assert!(err.to_string().starts_with("invalid hex encoding"));
}
