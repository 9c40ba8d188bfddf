//! Shared filesystem helpers built on `cap-std` and `camino`.
//!
//! Output files are written atomically: content goes to a staging file in
//! the destination directory, which is renamed over the target only after
//! every byte has been written and synced. A failed write leaves any
//! existing target untouched.
#![forbid(unsafe_code)]

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};
use std::io::{self, BufWriter};

/// Open a UTF-8 file path using ambient authority.
///
/// # Errors
/// Returns any I/O error raised while opening the file.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Resolve an ambient directory for the given path and return the directory with the file name.
///
/// A bare file name resolves against the current directory.
///
/// # Errors
/// Fails when `path` has no file name or its parent cannot be opened.
pub fn open_dir_and_file(path: &Utf8Path) -> io::Result<(fs_utf8::Dir, String)> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::other("target should include a file name"))?
        .to_owned();
    let dir = fs_utf8::Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Return whether a path exists and is a regular file using capability-based IO.
///
/// # Errors
/// Returns the I/O error raised while inspecting the path; an absent path
/// reports [`io::ErrorKind::NotFound`].
pub fn file_is_file(path: &Utf8Path) -> io::Result<bool> {
    let (dir, name) = open_dir_and_file(path)?;
    dir.metadata(name.as_str()).map(|meta| meta.is_file())
}

/// Write `path` atomically through `write`.
///
/// `write` receives a buffered writer over a staging file next to `path`.
/// When it succeeds the buffer is flushed, synced, and renamed over `path`;
/// when anything fails the staging file is removed and `path` is left as it
/// was.
///
/// # Errors
/// Returns the closure's error, or an I/O error from staging, syncing, or
/// renaming.
pub fn write_atomic<F, E>(path: &Utf8Path, write: F) -> Result<(), E>
where
    F: FnOnce(&mut BufWriter<fs_utf8::File>) -> Result<(), E>,
    E: From<io::Error>,
{
    let (dir, name) = open_dir_and_file(path)?;
    let staging = staging_name(&name);
    let mut writer = BufWriter::new(dir.create(staging.as_str())?);

    let written = write(&mut writer).and_then(|()| finish(writer).map_err(E::from));
    let renamed = written.and_then(|()| {
        dir.rename(staging.as_str(), &dir, name.as_str())
            .map_err(E::from)
    });
    if renamed.is_err() {
        discard(&dir, &staging);
    }
    renamed
}

fn staging_name(file_name: &str) -> String {
    format!(".{file_name}.{}.tmp", std::process::id())
}

fn finish(writer: BufWriter<fs_utf8::File>) -> io::Result<()> {
    let file = writer.into_inner().map_err(io::IntoInnerError::into_error)?;
    file.sync_all()
}

fn discard(dir: &fs_utf8::Dir, staging: &str) {
    // Best effort: the original write error is the one worth reporting.
    dir.remove_file(staging).ok();
}
