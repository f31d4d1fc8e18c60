use std::fs;

use storage::{DirectoryRepository, StorageError, WordListRepository};

#[test]
fn directory_lists_and_loads_word_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("spanish"), "cat \\ gato\ndog \\ perro (m.)\n").unwrap();
    fs::write(dir.path().join("french"), "###reversed\nle chat \\ cat\n").unwrap();
    fs::write(dir.path().join(".swap"), "ignored").unwrap();
    fs::create_dir(dir.path().join("archive")).unwrap();

    let repo = DirectoryRepository::new(dir.path());
    assert_eq!(repo.list_names().unwrap(), vec!["french", "spanish"]);

    let spanish = repo.load("spanish").unwrap().into_items(false).unwrap();
    assert_eq!(spanish.len(), 2);
    assert_eq!(spanish[1].answer(), "perro");
    assert_eq!(spanish[1].full_answer(), "perro (m.)");

    let french = repo.load("french").unwrap();
    assert!(french.is_reversed());
    let items = french.into_items(false).unwrap();
    assert_eq!(items[0].question(), "cat");
    assert_eq!(items[0].answer(), "le chat");
}

#[test]
fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let repo = DirectoryRepository::new(dir.path());
    assert!(matches!(
        repo.load("absent"),
        Err(StorageError::NotFound(name)) if name == "absent"
    ));
}

#[test]
fn missing_root_surfaces_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let repo = DirectoryRepository::new(dir.path().join("nowhere"));
    assert!(matches!(repo.list_names(), Err(StorageError::Io { .. })));
}
