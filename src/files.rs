use log::info;
use std::fs::{self, File};
use std::io::{Error, ErrorKind};
use std::path::Path;

/// Largest cover or stego image accepted, in bytes.
pub const MAX_INPUT_FILE_SIZE: u64 = 64_000_000;

fn invalid_input(message: String) -> Error {
    Error::new(ErrorKind::InvalidInput, message)
}

/// Opens `path` for reading after checking it is a regular file, returning it with its size.
pub fn open_regular(path: &Path, role: &str) -> Result<(File, u64), Error> {
    let metadata = fs::metadata(path)?;
    if !metadata.is_file() {
        return Err(invalid_input(format!("{} must be a regular file", role)));
    }
    Ok((File::open(path)?, metadata.len()))
}

/// Opens an image to read from, refusing anything above [`MAX_INPUT_FILE_SIZE`].
pub fn open_image(path: &Path) -> Result<File, Error> {
    let (file, size) = open_regular(path, "input")?;
    if size > MAX_INPUT_FILE_SIZE {
        return Err(invalid_input(format!(
            "input must not exceed 64 MB ({} bytes)",
            size
        )));
    }
    Ok(file)
}

pub fn open_secret(path: &Path) -> Result<File, Error> {
    let (file, size) = open_regular(path, "secret")?;
    info!("secret file size:\t{} bytes", size);
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_open_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cover.png");
        File::create(&path).unwrap().write_all(b"png").unwrap();

        assert!(open_image(&path).is_ok());
    }

    #[test]
    fn test_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();

        let err = open_image(dir.path()).unwrap_err();
        assert_eq!(ErrorKind::InvalidInput, err.kind());
        let err = open_secret(dir.path()).unwrap_err();
        assert_eq!("secret must be a regular file", err.to_string());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = open_secret(&dir.path().join("nope")).unwrap_err();
        assert_eq!(ErrorKind::NotFound, err.kind());
    }

    #[test]
    fn test_oversized_image_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.png");
        File::create(&path)
            .unwrap()
            .set_len(MAX_INPUT_FILE_SIZE + 1)
            .unwrap();

        let err = open_image(&path).unwrap_err();
        assert_eq!(ErrorKind::InvalidInput, err.kind());
        assert!(open_secret(&path).is_ok());
    }
}
