//! Blocking filesystem calls behind every async path operation.
//!
//! Each function here is an ordinary synchronous call on `std::fs` (or libc
//! where std has no equivalent). They run on a worker context, never on the
//! caller's scheduler. Errors are returned exactly as the OS reported them.

use std::ffi::{CStr, CString, OsStr, OsString};
use std::fs::{self, DirBuilder, Metadata, OpenOptions, Permissions};
use std::io;
use std::mem;
use std::os::unix::ffi::{OsStrExt, OsStringExt};
use std::os::unix::fs::{
    DirBuilderExt, FileTypeExt, MetadataExt, OpenOptionsExt, PermissionsExt,
};
use std::path::{Path, PathBuf};
use std::ptr;

use aiopath_pure::PurePosixPath;

/// Lookup buffers stop growing past this size.
const MAX_LOOKUP_BUFFER: usize = 1 << 20;

/// Options for [`mkdir`], mirroring `mkdir -p` style flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MkdirOptions {
    /// Permission bits for the new directory, before the umask.
    pub mode: u32,

    /// Create missing ancestors (with the default mode).
    pub parents: bool,

    /// Succeed if the directory already exists.
    pub exist_ok: bool,
}

impl MkdirOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn mode(mut self, mode: u32) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn parents(mut self, parents: bool) -> Self {
        self.parents = parents;
        self
    }

    #[must_use]
    pub fn exist_ok(mut self, exist_ok: bool) -> Self {
        self.exist_ok = exist_ok;
        self
    }
}

impl Default for MkdirOptions {
    fn default() -> Self {
        Self {
            mode: 0o777,
            parents: false,
            exist_ok: false,
        }
    }
}

fn c_path(path: &Path) -> io::Result<CString> {
    CString::new(path.as_os_str().as_bytes())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
}

/// Errors that mean "no such thing here" for the type predicates.
fn is_ignorable(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::NotFound
        || matches!(
            err.raw_os_error(),
            Some(libc::ENOTDIR | libc::EBADF | libc::ELOOP)
        )
}

pub(crate) fn stat(path: &Path, follow_symlinks: bool) -> io::Result<Metadata> {
    if follow_symlinks {
        fs::metadata(path)
    } else {
        fs::symlink_metadata(path)
    }
}

fn test_type(
    path: &Path,
    follow_symlinks: bool,
    predicate: impl FnOnce(&Metadata) -> bool,
) -> io::Result<bool> {
    match stat(path, follow_symlinks) {
        Ok(meta) => Ok(predicate(&meta)),
        Err(err) if is_ignorable(&err) => Ok(false),
        Err(err) => Err(err),
    }
}

pub(crate) fn exists(path: &Path, follow_symlinks: bool) -> io::Result<bool> {
    test_type(path, follow_symlinks, |_| true)
}

pub(crate) fn is_dir(path: &Path) -> io::Result<bool> {
    test_type(path, true, Metadata::is_dir)
}

pub(crate) fn is_file(path: &Path) -> io::Result<bool> {
    test_type(path, true, Metadata::is_file)
}

pub(crate) fn is_symlink(path: &Path) -> io::Result<bool> {
    test_type(path, false, |m| m.file_type().is_symlink())
}

pub(crate) fn is_socket(path: &Path) -> io::Result<bool> {
    test_type(path, true, |m| m.file_type().is_socket())
}

pub(crate) fn is_fifo(path: &Path) -> io::Result<bool> {
    test_type(path, true, |m| m.file_type().is_fifo())
}

pub(crate) fn is_block_device(path: &Path) -> io::Result<bool> {
    test_type(path, true, |m| m.file_type().is_block_device())
}

pub(crate) fn is_char_device(path: &Path) -> io::Result<bool> {
    test_type(path, true, |m| m.file_type().is_char_device())
}

/// A mount point sits on a different device than its parent, or is its own
/// parent (the root). Symlinks are never mount points.
pub(crate) fn is_mount(path: &Path) -> io::Result<bool> {
    let Ok(own) = fs::symlink_metadata(path) else {
        return Ok(false);
    };
    if own.file_type().is_symlink() {
        return Ok(false);
    }

    let parent = match fs::canonicalize(path.join("..")) {
        Ok(parent) => parent,
        Err(_) => return Ok(false),
    };
    let Ok(up) = fs::symlink_metadata(parent) else {
        return Ok(false);
    };

    Ok(own.dev() != up.dev() || own.ino() == up.ino())
}

pub(crate) fn samefile(path: &Path, other: &Path) -> io::Result<bool> {
    let own = fs::metadata(path)?;
    let theirs = fs::metadata(other)?;
    Ok(own.dev() == theirs.dev() && own.ino() == theirs.ino())
}

/// Run a reentrant libc database lookup, growing the buffer on `ERANGE`.
///
/// `call` returns the libc status code on failure, `Ok(None)` when the entry
/// does not exist, and the extracted value otherwise. Values must be copied
/// out of the buffer before `call` returns.
fn lookup<T>(
    mut call: impl FnMut(&mut [libc::c_char]) -> Result<Option<T>, libc::c_int>,
) -> io::Result<Option<T>> {
    let mut buf: Vec<libc::c_char> = vec![0; 1024];
    loop {
        match call(&mut buf) {
            Ok(found) => return Ok(found),
            Err(libc::ERANGE) if buf.len() < MAX_LOOKUP_BUFFER => {
                let len = buf.len() * 2;
                buf.resize(len, 0);
            }
            Err(code) => return Err(io::Error::from_raw_os_error(code)),
        }
    }
}

fn user_name(uid: libc::uid_t) -> io::Result<String> {
    let name = lookup(|buf| {
        // SAFETY: all-zero is a valid bit pattern for this plain C struct.
        let mut entry: libc::passwd = unsafe { mem::zeroed() };
        let mut found: *mut libc::passwd = ptr::null_mut();
        // SAFETY: every pointer is valid for the duration of the call and
        // `buf.len()` is the true buffer length.
        let rc = unsafe {
            libc::getpwuid_r(uid, &mut entry, buf.as_mut_ptr(), buf.len(), &mut found)
        };
        if rc != 0 {
            return Err(rc);
        }
        if found.is_null() {
            return Ok(None);
        }
        // SAFETY: on success `pw_name` points to a NUL-terminated string in `buf`.
        let name = unsafe { CStr::from_ptr(entry.pw_name) };
        Ok(Some(name.to_string_lossy().into_owned()))
    })?;

    name.ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("getpwuid(): uid not found: {}", uid),
        )
    })
}

fn group_name(gid: libc::gid_t) -> io::Result<String> {
    let name = lookup(|buf| {
        // SAFETY: all-zero is a valid bit pattern for this plain C struct.
        let mut entry: libc::group = unsafe { mem::zeroed() };
        let mut found: *mut libc::group = ptr::null_mut();
        // SAFETY: as in `user_name`.
        let rc = unsafe {
            libc::getgrgid_r(gid, &mut entry, buf.as_mut_ptr(), buf.len(), &mut found)
        };
        if rc != 0 {
            return Err(rc);
        }
        if found.is_null() {
            return Ok(None);
        }
        // SAFETY: on success `gr_name` points to a NUL-terminated string in `buf`.
        let name = unsafe { CStr::from_ptr(entry.gr_name) };
        Ok(Some(name.to_string_lossy().into_owned()))
    })?;

    name.ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("getgrgid(): gid not found: {}", gid),
        )
    })
}

fn home_of_user(user: &OsStr) -> io::Result<Option<PathBuf>> {
    let user = CString::new(user.as_bytes())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    lookup(|buf| {
        // SAFETY: all-zero is a valid bit pattern for this plain C struct.
        let mut entry: libc::passwd = unsafe { mem::zeroed() };
        let mut found: *mut libc::passwd = ptr::null_mut();
        // SAFETY: as in `user_name`; `user` is NUL-terminated.
        let rc = unsafe {
            libc::getpwnam_r(
                user.as_ptr(),
                &mut entry,
                buf.as_mut_ptr(),
                buf.len(),
                &mut found,
            )
        };
        if rc != 0 {
            return Err(rc);
        }
        if found.is_null() {
            return Ok(None);
        }
        // SAFETY: on success `pw_dir` points to a NUL-terminated string in `buf`.
        let dir = unsafe { CStr::from_ptr(entry.pw_dir) };
        Ok(Some(PathBuf::from(OsString::from_vec(dir.to_bytes().to_vec()))))
    })
}

pub(crate) fn owner(path: &Path) -> io::Result<String> {
    user_name(fs::metadata(path)?.uid())
}

pub(crate) fn group(path: &Path) -> io::Result<String> {
    group_name(fs::metadata(path)?.gid())
}

pub(crate) fn home_dir() -> io::Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "could not determine home directory",
        )
    })
}

/// Replace a leading `~` or `~user` component with that user's home.
///
/// Absolute paths and paths not starting with `~` come back unchanged.
pub(crate) fn expanduser(path: &PurePosixPath) -> io::Result<PathBuf> {
    let parts = path.parts();
    let first = match parts.first() {
        Some(first) if !path.is_absolute() && first.as_bytes().starts_with(b"~") => *first,
        _ => return Ok(path.as_path().to_path_buf()),
    };

    let home = if first.len() == 1 {
        home_dir()?
    } else {
        let user = OsStr::from_bytes(&first.as_bytes()[1..]);
        home_of_user(user)?.ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "could not determine home directory",
            )
        })?
    };

    Ok(parts[1..].iter().fold(home, |acc, part| acc.join(part)))
}

pub(crate) fn absolute(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(std::env::current_dir()?.join(path))
}

pub(crate) fn chmod(path: &Path, mode: u32, follow_symlinks: bool) -> io::Result<()> {
    if follow_symlinks {
        return fs::set_permissions(path, Permissions::from_mode(mode));
    }

    let c_path = c_path(path)?;
    // SAFETY: `c_path` is a valid NUL-terminated string for the call.
    let rc = unsafe {
        libc::fchmodat(
            libc::AT_FDCWD,
            c_path.as_ptr(),
            mode as libc::mode_t,
            libc::AT_SYMLINK_NOFOLLOW,
        )
    };
    if rc != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

pub(crate) fn mkdir(path: &Path, options: MkdirOptions) -> io::Result<()> {
    match DirBuilder::new().mode(options.mode).create(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            if !options.parents {
                return Err(err);
            }
            let parent = match path.parent() {
                Some(parent) if parent.as_os_str().is_empty() => Path::new("."),
                Some(parent) => parent,
                None => return Err(err),
            };

            mkdir(parent, MkdirOptions::new().parents(true).exist_ok(true))?;
            mkdir(path, MkdirOptions { parents: false, ..options })
        }
        Err(err) => {
            if options.exist_ok && path.is_dir() {
                Ok(())
            } else {
                Err(err)
            }
        }
    }
}

pub(crate) fn unlink(path: &Path, missing_ok: bool) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(err) if missing_ok && err.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

/// Set access and modification times to now.
fn utime_now(path: &Path) -> io::Result<()> {
    let c_path = c_path(path)?;
    // SAFETY: `c_path` is NUL-terminated; a null `times` means "now".
    let rc = unsafe { libc::utimensat(libc::AT_FDCWD, c_path.as_ptr(), ptr::null(), 0) };
    if rc != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

pub(crate) fn touch(path: &Path, mode: u32, exist_ok: bool) -> io::Result<()> {
    if exist_ok && utime_now(path).is_ok() {
        return Ok(());
    }

    let mut options = OpenOptions::new();
    options.write(true).mode(mode);
    if exist_ok {
        options.create(true);
    } else {
        options.create_new(true);
    }
    options.open(path).map(drop)
}

pub(crate) fn symlink_to(path: &Path, target: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, path)
}

pub(crate) fn hardlink_to(path: &Path, target: &Path) -> io::Result<()> {
    fs::hard_link(target, path)
}

pub(crate) fn write_bytes(path: &Path, data: &[u8]) -> io::Result<usize> {
    fs::write(path, data)?;
    Ok(data.len())
}

/// Returns the number of characters written, not bytes.
pub(crate) fn write_text(path: &Path, data: &str) -> io::Result<usize> {
    fs::write(path, data)?;
    Ok(data.chars().count())
}

/// Names of the directory's members, without `.` and `..`.
pub(crate) fn listdir(path: &Path) -> io::Result<Vec<OsString>> {
    fs::read_dir(path)?
        .map(|entry| entry.map(|e| e.file_name()))
        .collect()
}
