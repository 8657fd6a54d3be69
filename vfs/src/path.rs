use crate::VfsError;

/// Normalize a blob name into a relative, forward-slash path.
///
/// Backslashes become `/`, empty and `.` segments are dropped, and leading
/// or trailing separators are stripped. A `..` segment or a name with no
/// segments left is rejected with [`VfsError::InvalidPath`].
pub fn normalize(name: &str) -> Result<String, VfsError> {
    let unified = name.replace('\\', "/");
    let mut segments = Vec::new();

    for segment in unified.split('/').filter(|s| !s.is_empty() && *s != ".") {
        if segment == ".." {
            return Err(VfsError::InvalidPath(format!(
                "'{name}': path traversal (..) not allowed"
            )));
        }
        segments.push(segment);
    }

    if segments.is_empty() {
        return Err(VfsError::InvalidPath(format!("'{name}': empty name")));
    }

    Ok(segments.join("/"))
}
