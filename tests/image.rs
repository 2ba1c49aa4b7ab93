#![allow(unused)]

mod common;

use common::temp_image;
use flatfs::Error;
use flatfs::FileSystem;
use flatfs::BLOCK_SIZE;
use flatfs::TOTAL_BLOCKS;

#[test]
fn test_create_persists_image() {
    let (_guard, image) = temp_image("volume.bin");
    let fs = FileSystem::create(&image).unwrap();

    let on_disk = std::fs::metadata(&image).unwrap().len();
    assert!(on_disk > 0, "create must persist immediately");
    assert_eq!(on_disk as usize, fs.to_bytes().len());

    let loaded = FileSystem::load(&image).unwrap();
    assert_eq!(loaded, fs);
}

#[test]
fn test_image_prefix_layout() {
    let (_guard, image) = temp_image("layout.bin");
    let fs = FileSystem::create(&image).unwrap();
    let bytes = fs.to_bytes();

    // Superblock first: u32 total blocks, u32 block size, little-endian.
    assert_eq!(&bytes[0..4], &(TOTAL_BLOCKS as u32).to_le_bytes());
    assert_eq!(&bytes[4..8], &(BLOCK_SIZE as u32).to_le_bytes());
    // Then one byte per free-list slot: the root occupies slot 0.
    assert_eq!(bytes[8], 0x00);
    assert_eq!(bytes[9], 0x01);
    assert_eq!(&bytes[9..8 + TOTAL_BLOCKS], &vec![0x01; TOTAL_BLOCKS - 1][..]);
}

#[test]
fn test_round_trip_after_ops() {
    let (_guard, image) = temp_image("ops.bin");
    let mut fs = FileSystem::create(&image).unwrap();
    fs.create_file("t1.txt", b"hi").unwrap();
    fs.create_file("t2.txt", b"yo").unwrap();
    fs.create_file("blob.bin", &vec![0xAB; BLOCK_SIZE]).unwrap();
    fs.delete_file("t1.txt").unwrap();

    fs.save(&image).unwrap();
    let loaded = FileSystem::load(&image).unwrap();
    assert_eq!(loaded, fs);

    // Field-level spot checks on top of the aggregate equality.
    let entry = loaded
        .directory()
        .iter()
        .find(|e| e.name == "t2.txt")
        .unwrap();
    assert_eq!(loaded.inode(entry.inode).unwrap().data, b"yo");
    assert_eq!(loaded.slots().occupied_count(), loaded.directory().len());
}

#[test]
fn test_save_rewrites_whole_image() {
    let (_guard, image) = temp_image("rewrite.bin");
    let mut fs = FileSystem::create(&image).unwrap();
    fs.create_file("grow.txt", &vec![1u8; 2048]).unwrap();
    fs.save(&image).unwrap();
    let grown = std::fs::metadata(&image).unwrap().len();

    fs.delete_file("grow.txt").unwrap();
    fs.save(&image).unwrap();
    let shrunk = std::fs::metadata(&image).unwrap().len();

    // Truncate-and-write: the image never keeps stale tail bytes around.
    assert!(shrunk < grown);
    assert_eq!(shrunk as usize, fs.to_bytes().len());
}

#[test]
fn test_truncated_image_fails_explicitly() {
    let (_guard, image) = temp_image("trunc.bin");
    let mut fs = FileSystem::create(&image).unwrap();
    fs.create_file("t1.txt", b"hello").unwrap();
    let bytes = fs.to_bytes();

    // Cut in the superblock, in the free list, inside a length-prefixed
    // name, and one byte short of a full image.
    for cut in [3, 8 + TOTAL_BLOCKS / 2, 8 + TOTAL_BLOCKS + 8, bytes.len() - 1] {
        let result = FileSystem::from_bytes(&bytes[..cut]);
        assert!(
            matches!(result, Err(Error::Truncated { .. })),
            "cut at {cut} must report truncation"
        );
    }

    std::fs::write(&image, &bytes[..bytes.len() / 2]).unwrap();
    assert!(matches!(
        FileSystem::load(&image),
        Err(Error::Truncated { .. })
    ));
}

#[test]
fn test_invalid_superblock_rejected() {
    let (_guard, image) = temp_image("badsb.bin");
    let fs = FileSystem::create(&image).unwrap();
    let mut bytes = fs.to_bytes();

    bytes[4..8].copy_from_slice(&512u32.to_le_bytes());
    assert!(matches!(
        FileSystem::from_bytes(&bytes),
        Err(Error::InvalidSuperBlock(_))
    ));

    let mut bytes = fs.to_bytes();
    bytes[0..4].copy_from_slice(&0u32.to_le_bytes());
    assert!(matches!(
        FileSystem::from_bytes(&bytes),
        Err(Error::InvalidSuperBlock(_))
    ));
}

#[test]
fn test_free_list_decodes_any_nonzero_as_free() {
    let (_guard, image) = temp_image("bools.bin");
    let fs = FileSystem::create(&image).unwrap();
    let mut bytes = fs.to_bytes();

    // Slot 5 is free and encoded as 0x01; any non-zero byte means the same.
    bytes[8 + 5] = 0xFF;
    let loaded = FileSystem::from_bytes(&bytes).unwrap();
    assert!(loaded.slots().free_list()[5]);
    assert_eq!(loaded.slots().occupied_count(), 1);
}

#[test]
fn test_load_missing_image_fails() {
    let (_guard, image) = temp_image("nonexistent.bin");
    assert!(matches!(FileSystem::load(&image), Err(Error::Io(_))));
}

// The driver loop: create the volume if the image is missing, then load,
// operate and save on every run.
#[test]
fn test_driver_contract_across_runs() {
    let (_guard, image) = temp_image("driver.bin");

    // First run: no image yet, so the driver formats one, then mutates it.
    if !image.exists() {
        FileSystem::create(&image).unwrap();
    }
    let mut fs = FileSystem::load(&image).unwrap();
    fs.create_file("t1.txt", b"hi").unwrap();
    fs.create_file("t2.txt", b"yo").unwrap();
    fs.save(&image).unwrap();

    // Second run: the image exists, so the driver goes straight to load.
    assert!(image.exists());
    let mut fs = FileSystem::load(&image).unwrap();
    assert_eq!(fs.list_files().entries.len(), 3);
    fs.delete_file("t1.txt").unwrap();
    fs.save(&image).unwrap();

    // Third run sees the deletion, with t2's payload intact.
    let fs = FileSystem::load(&image).unwrap();
    let names: Vec<&str> = fs.directory().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["/", "t2.txt"]);
    let t2 = fs.directory().iter().find(|e| e.name == "t2.txt").unwrap();
    assert!(fs.inode(t2.inode).unwrap().used);
    assert_eq!(fs.inode(t2.inode).unwrap().data, b"yo");
}
