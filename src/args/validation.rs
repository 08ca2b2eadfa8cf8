use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;

/// # Errors
///
/// Will return `Err` if the path is a file or the directory can't be created
pub fn check_data_dir(dir: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(dir);
    if path.is_dir() {
        return Ok(path);
    }
    if path.exists() {
        return Err(format!("The data dir '{dir}' is not a directory."));
    }
    fs::create_dir_all(&path)
        .map_err(|e| format!("The data dir '{dir}' could not be created: {e}"))?;
    Ok(path)
}

/// # Errors
///
/// Will return `Err` if the file is not readable
pub fn check_readable_file(file: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(file);
    if !path.is_file() || fs::metadata(&path).is_err() {
        return Err(format!("The file '{file}' is not readable."));
    }
    Ok(path)
}

/// # Errors
///
/// Will return `Err` if the address isn't `host:port`
pub fn check_bind_addr(addr: &str) -> Result<String, String> {
    addr.parse::<SocketAddr>()
        .map(|_| addr.to_string())
        .map_err(|e| format!("The bind address '{addr}' is invalid: {e}"))
}
