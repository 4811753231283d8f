use mobilegraph::types::{
    NO_RECORD,
    error::DatabaseError,
    label::LabelAddress,
    node::{NODE_SIZE, NODES_PER_PAGE, Node},
};

#[test]
fn test_default_node_layout() {
    let node = Node::default();
    let bytes = node.to_bytes();

    assert_eq!(NODE_SIZE, 20);
    assert_eq!(NODES_PER_PAGE, 204);
    assert_eq!(bytes[0], 0x01);
    assert_eq!(&bytes[1..5], &[0, 0, 0, 0]);
    assert_eq!(&bytes[5..9], &NO_RECORD.to_le_bytes());
    assert_eq!(&bytes[9..13], &NO_RECORD.to_le_bytes());
    assert_eq!(&bytes[13..19], &[0xFF, 0x00, 0xFF, 0x00, 0xFF, 0x00]);
    assert_eq!(bytes[19], 0x00);
}

#[test]
fn test_external_id_and_labels_encoding() {
    let mut node = Node::new(0);
    node.set_external_id(120);
    node.add_label(LabelAddress::new(0, 26)).unwrap();
    node.add_label(LabelAddress::new(1, 26)).unwrap();

    let bytes = node.to_bytes();
    assert_eq!(&bytes[1..5], &120u32.to_le_bytes());
    assert_eq!(&bytes[13..19], &[0x00, 26, 0x01, 26, 0xFF, 0x00]);

    let decoded = Node::from_bytes(&bytes).unwrap();
    assert_eq!(decoded, node);
    assert_eq!(decoded.label_count(), 2);
    assert_eq!(
        decoded.labels().collect::<Vec<_>>(),
        vec![LabelAddress::new(0, 26), LabelAddress::new(1, 26)]
    );
}

#[test]
fn test_add_label_is_idempotent() {
    let mut node = Node::new(1);
    let address = LabelAddress::new(0, 3);

    node.add_label(address).unwrap();
    node.add_label(address).unwrap();

    assert_eq!(node.label_count(), 1);
    assert_eq!(node.label_slots()[1], None);
}

#[test]
fn test_fourth_label_is_reported_not_fatal() {
    let mut node = Node::new(42);
    for slot in 0..3 {
        node.add_label(LabelAddress::new(0, slot)).unwrap();
    }
    let before = node.clone();

    let result = node.add_label(LabelAddress::new(0, 99));
    assert!(matches!(
        result,
        Err(DatabaseError::LabelOverflow { external_id: 42 })
    ));
    assert_eq!(node, before);

    // Re-adding a present label still succeeds on a full node.
    assert!(node.add_label(LabelAddress::new(0, 1)).is_ok());
}

#[test]
fn test_reserved_label_page_rejected() {
    let mut node = Node::new(1);
    let result = node.add_label(LabelAddress::new(0xFF, 0));
    assert!(matches!(result, Err(DatabaseError::InvalidLabel { .. })));
    assert_eq!(node.label_count(), 0);
}

#[test]
fn test_in_use_flag() {
    let mut node = Node::new(7);
    node.set_in_use(false);
    let decoded = Node::from_bytes(&node.to_bytes()).unwrap();
    assert!(!decoded.in_use);

    // Zeroed space reads as an unused record.
    let zeroed = Node::from_bytes(&[0u8; NODE_SIZE]).unwrap();
    assert!(!zeroed.in_use);
}

#[test]
fn test_from_bytes_rejects_wrong_size() {
    let result = Node::from_bytes(&[0u8; NODE_SIZE - 1]);
    assert!(matches!(
        result,
        Err(DatabaseError::InvalidRecordSize {
            record: "node",
            expected: NODE_SIZE,
            actual: 19
        })
    ));
}
