use mobilegraph::types::{
    error::DatabaseError,
    label::{LABEL_SIZE, LABEL_TEXT_SIZE, LabelAddress, NodeLabel},
};

#[test]
fn test_label_layout() {
    let mut label = NodeLabel::new("TEACHES").unwrap();
    label.chain_length = 2;
    let bytes = label.to_bytes();

    assert_eq!(LABEL_SIZE, 18);
    assert_eq!(&bytes[..7], b"TEACHES");
    assert!(bytes[7..LABEL_TEXT_SIZE].iter().all(|&b| b == 0));
    assert_eq!(bytes[17], 2);

    let decoded = NodeLabel::from_bytes(&bytes).unwrap();
    assert_eq!(decoded, label);
    assert_eq!(decoded.text(), "TEACHES");
}

#[test]
fn test_text_is_padded_to_field_width() {
    let label = NodeLabel::new("TEACHES").unwrap();
    let mut expected = [0u8; LABEL_TEXT_SIZE];
    expected[..7].copy_from_slice(b"TEACHES");

    assert_eq!(label.text_bytes(), &expected);
    assert!(label.is_text(&expected));
    assert!(!label.is_text(&NodeLabel::pad_text("TEACHES_HOMEROOM").unwrap()));
}

#[test]
fn test_full_width_label() {
    let text = "ABCDEFGHIJKLMNOPQ";
    assert_eq!(text.len(), LABEL_TEXT_SIZE);

    let label = NodeLabel::new(text).unwrap();
    assert_eq!(label.text(), text);
    assert!(!label.is_empty());
}

#[test]
fn test_oversized_label_rejected() {
    let result = NodeLabel::new("ABCDEFGHIJKLMNOPQR");
    assert!(matches!(
        result,
        Err(DatabaseError::LabelTooLong { len: 18, max: 17 })
    ));
}

#[test]
fn test_empty_and_nul_labels_rejected() {
    assert!(matches!(
        NodeLabel::new(""),
        Err(DatabaseError::InvalidLabel { .. })
    ));
    assert!(matches!(
        NodeLabel::new("A\0B"),
        Err(DatabaseError::InvalidLabel { .. })
    ));
}

#[test]
fn test_zeroed_record_is_empty() {
    let label = NodeLabel::from_bytes(&[0u8; LABEL_SIZE]).unwrap();
    assert!(label.is_empty());
    assert_eq!(label.chain_length, 0);
    assert_eq!(label.text(), "");
}

#[test]
fn test_address_display() {
    assert_eq!(LabelAddress::new(2, 26).to_string(), "2:26");
}
