use std::fs;

use clusterscope_core::Download;
use clusterscope_engine::{safe_filename, DownloadError, DownloadWriter};
use tempfile::TempDir;

fn download(filename: &str, content: &str) -> Download {
    Download {
        filename: filename.to_string(),
        content: content.to_string(),
    }
}

fn dir_entries(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn creates_missing_download_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("downloads").join("today");
    let writer = DownloadWriter::new(new_dir.clone());

    let saved = writer.save(&download("cluster_0.txt", "a")).unwrap();
    assert!(new_dir.is_dir());
    assert_eq!(saved.path, new_dir.join("cluster_0.txt"));
    assert!(!saved.replaced);
}

#[test]
fn save_replaces_existing_file() {
    let temp = TempDir::new().unwrap();
    let writer = DownloadWriter::new(temp.path().to_path_buf());

    let first = writer.save(&download("cluster_0.txt", "a\nb")).unwrap();
    assert_eq!(first.path.file_name().unwrap(), "cluster_0.txt");
    assert!(!first.replaced);
    assert_eq!(fs::read_to_string(&first.path).unwrap(), "a\nb");

    let second = writer.save(&download("cluster_0.txt", "c")).unwrap();
    assert_eq!(first.path, second.path);
    assert!(second.replaced);
    assert_eq!(fs::read_to_string(&second.path).unwrap(), "c");
    assert_eq!(dir_entries(temp.path()), vec!["cluster_0.txt".to_string()]);
}

#[test]
fn failed_replace_keeps_the_existing_entry_and_leaves_no_staging_file() {
    let temp = TempDir::new().unwrap();
    // A non-empty directory squatting on the name cannot be renamed over.
    let squatter = temp.path().join("all_clusters.txt");
    fs::create_dir(&squatter).unwrap();
    fs::write(squatter.join("keep.txt"), "kept").unwrap();

    let writer = DownloadWriter::new(temp.path().to_path_buf());
    let err = writer
        .save(&download("all_clusters.txt", "new"))
        .unwrap_err();
    assert!(matches!(err, DownloadError::Io(_)), "{err:?}");

    assert_eq!(fs::read_to_string(squatter.join("keep.txt")).unwrap(), "kept");
    assert_eq!(dir_entries(temp.path()), vec!["all_clusters.txt".to_string()]);
}

#[test]
fn unsafe_cluster_ids_stay_inside_download_dir() {
    let temp = TempDir::new().unwrap();
    let writer = DownloadWriter::new(temp.path().to_path_buf());

    let saved = writer.save(&download("cluster_../../x.txt", "z")).unwrap();
    assert_eq!(saved.path.parent().unwrap(), temp.path());
    assert_eq!(saved.path.file_name().unwrap(), "cluster_.._.._x.txt");
}

#[test]
fn safe_filename_replaces_forbidden_characters() {
    assert_eq!(safe_filename("cluster_a:b?.txt"), "cluster_a_b_.txt");
    assert_eq!(safe_filename("cluster_\u{7}.txt"), "cluster__.txt");
    assert_eq!(safe_filename(" . "), "download.txt");
}

#[test]
fn save_into_a_file_path_fails() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = DownloadWriter::new(file_path.clone());
    let err = writer
        .save(&download("all_clusters.txt", "data"))
        .unwrap_err();
    assert!(matches!(err, DownloadError::Dir { .. }), "{err:?}");
    assert!(!file_path.with_file_name("all_clusters.txt").exists());
}
