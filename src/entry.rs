use std::path::PathBuf;

/// A single file discovered by the walk, passed to the
/// [`Handler`](crate::traits::Handler) exactly once.
///
/// Transient by design — no entity owns an entry; the engine builds one per
/// discovered file and hands a reference to the handler. Handlers only ever
/// see regular files: directories are recursed into and hidden entries are
/// skipped before this type is constructed.
pub struct Entry {
    /// Full path to the file, rooted at the walk's root directory.
    pub path: PathBuf,

    /// The file's name (final path component).
    pub name: String,

    /// How deep in the tree this file was found. Children of the root = 1.
    pub depth: usize,
}
