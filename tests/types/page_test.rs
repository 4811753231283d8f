use mobilegraph::types::{
    PAGE_DATA_OFFSET, PAGE_DATA_SIZE, PAGE_SIZE, error::DatabaseError, page::Page,
};

// Test utilities
fn create_test_data(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 251 + 1) as u8).collect()
}

#[test]
fn test_page_creation_and_basic_properties() {
    let page = Page::new(3);

    assert_eq!(page.page_number, 3);
    assert_eq!(page.data_length(), 0);
    assert_eq!(page.as_bytes().len(), PAGE_SIZE);
    assert_eq!(page.data().len(), PAGE_DATA_SIZE);
    assert!(page.as_bytes().iter().all(|&b| b == 0));
    assert_eq!(page.available_space(), PAGE_DATA_SIZE - 1);
}

#[test]
fn test_append_returns_offsets_and_advances_length() {
    let mut page = Page::new(0);
    let first = create_test_data(20);
    let second = create_test_data(13);

    assert_eq!(page.append(&first).unwrap(), 0);
    assert_eq!(page.append(&second).unwrap(), 20);
    assert_eq!(page.data_length(), 33);

    assert_eq!(page.data_at_offset(0, 20).unwrap(), first.as_slice());
    assert_eq!(page.data_at_offset(20, 13).unwrap(), second.as_slice());
}

#[test]
fn test_length_header_is_little_endian_on_disk() {
    let mut page = Page::new(0);
    page.append(&create_test_data(300)).unwrap();

    let bytes = page.as_bytes();
    assert_eq!(u16::from_le_bytes([bytes[0], bytes[1]]), 300);
    assert_eq!(bytes[PAGE_DATA_OFFSET], 1);
}

#[test]
fn test_append_rejects_write_reaching_data_region_end() {
    let mut page = Page::new(7);
    page.append(&create_test_data(PAGE_DATA_SIZE - 10)).unwrap();
    let before = page.clone();

    // 10 more bytes would end exactly at the data region size.
    let result = page.append(&create_test_data(10));
    assert!(matches!(result, Err(DatabaseError::PageFull { page_id: 7 })));
    assert_eq!(page, before);

    // One byte less still fits.
    assert_eq!(page.append(&create_test_data(9)).unwrap(), (PAGE_DATA_SIZE - 10) as u16);
    assert_eq!(page.data_length() as usize, PAGE_DATA_SIZE - 1);
    assert_eq!(page.available_space(), 0);
}

#[test]
fn test_set_at_offset_raises_length_but_never_lowers_it() {
    let mut page = Page::new(0);

    page.set_at_offset(&create_test_data(18), 100).unwrap();
    assert_eq!(page.data_length(), 118);

    // Patch an earlier range: the length stays put.
    page.set_at_offset(&[0xAA; 4], 10).unwrap();
    assert_eq!(page.data_length(), 118);
    assert_eq!(page.data_at_offset(10, 4).unwrap(), &[0xAA; 4]);

    // Bytes between the old length and the write offset stay zeroed.
    assert!(page.data_at_offset(14, 86).unwrap().iter().all(|&b| b == 0));
}

#[test]
fn test_set_at_offset_out_of_bounds_leaves_page_untouched() {
    let mut page = Page::new(1);
    page.set_at_offset(&create_test_data(40), 0).unwrap();
    let before = page.clone();

    let result = page.set_at_offset(&create_test_data(18), PAGE_DATA_SIZE - 18);
    assert!(matches!(
        result,
        Err(DatabaseError::OutOfPageBounds {
            page_id: 1,
            len: 18,
            ..
        })
    ));
    assert_eq!(page, before);

    assert!(page.set_at_offset(&create_test_data(18), PAGE_DATA_SIZE - 19).is_ok());
    assert_eq!(page.data_length() as usize, PAGE_DATA_SIZE - 1);
}

#[test]
fn test_data_at_offset_bounds() {
    let page = Page::new(0);
    assert!(page.data_at_offset(PAGE_DATA_SIZE - 4, 4).is_ok());
    assert!(matches!(
        page.data_at_offset(PAGE_DATA_SIZE - 3, 4),
        Err(DatabaseError::OutOfPageBounds { .. })
    ));
}

#[test]
fn test_from_bytes_restores_image() {
    let mut page = Page::new(5);
    page.append(b"hello").unwrap();
    page.set_at_offset(b"world", 200).unwrap();

    let restored = Page::from_bytes(5, page.as_bytes()).unwrap();
    assert_eq!(restored, page);
    assert_eq!(restored.data_length(), 205);
}

#[test]
fn test_from_bytes_rejects_wrong_size() {
    let result = Page::from_bytes(0, &[0u8; 100]);
    assert!(matches!(
        result,
        Err(DatabaseError::InvalidPageSize {
            expected: PAGE_SIZE,
            actual: 100
        })
    ));
}

#[test]
fn test_from_bytes_rejects_length_past_data_region() {
    let mut image = vec![0u8; PAGE_SIZE];
    image[..2].copy_from_slice(&(PAGE_DATA_SIZE as u16 + 1).to_le_bytes());

    let result = Page::from_bytes(9, &image);
    assert!(matches!(
        result,
        Err(DatabaseError::CorruptedPage { page_id: 9, .. })
    ));
}

#[test]
fn test_from_bytes_rejects_length_filling_data_region() {
    let mut image = vec![0u8; PAGE_SIZE];
    image[..2].copy_from_slice(&(PAGE_DATA_SIZE as u16).to_le_bytes());

    assert!(matches!(
        Page::from_bytes(4, &image),
        Err(DatabaseError::CorruptedPage { page_id: 4, .. })
    ));

    // The largest length a write can produce still loads.
    image[..2].copy_from_slice(&(PAGE_DATA_SIZE as u16 - 1).to_le_bytes());
    let page = Page::from_bytes(4, &image).unwrap();
    assert_eq!(page.available_space(), 0);
    assert!(!page.can_fit(1));
}

#[test]
fn test_huge_offsets_are_out_of_bounds() {
    let mut page = Page::new(2);

    assert!(matches!(
        page.set_at_offset(b"abc", usize::MAX - 1),
        Err(DatabaseError::OutOfPageBounds { page_id: 2, .. })
    ));
    assert!(matches!(
        page.data_at_offset(usize::MAX, 2),
        Err(DatabaseError::OutOfPageBounds { page_id: 2, .. })
    ));
    assert_eq!(page.data_length(), 0);
}
