//! The awaitable filesystem surface of a path.

use std::fs::Metadata;
use std::path::{Path, PathBuf};

use aiopath_pure::PurePosixPath;
use async_trait::async_trait;

use crate::{blocking, glob, AsyncPath, IterDir, MkdirOptions, Result};

/// Filesystem operations on a path, each run off the caller's scheduler.
///
/// Every method performs one blocking call on the path's
/// [`Offloader`](aiopath_offload::Offloader) and yields its outcome
/// unchanged: OS errors arrive as [`Error::Io`](crate::Error::Io) with the
/// original kind and errno. Methods that produce a path return an
/// [`AsyncPath`] sharing the receiver's offloader.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `&dyn PathIo` or `Box<dyn PathIo>`.
///
/// # Example
///
/// ```rust,no_run
/// use aiopath::{AsyncPath, PathIo};
///
/// # async fn demo() -> aiopath::Result<()> {
/// let config = AsyncPath::new("/etc/hostname")?;
/// if config.is_file().await? {
///     println!("{}", config.read_text().await?.trim());
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait PathIo: Send + Sync {
    /// File metadata, following symlinks unless told not to.
    async fn stat(&self, follow_symlinks: bool) -> Result<Metadata>;

    /// Metadata of the path itself, never following a final symlink.
    async fn lstat(&self) -> Result<Metadata>;

    /// Whether the path exists.
    ///
    /// Missing entries, a non-directory in the middle of the path, bad file
    /// descriptors and symlink loops all mean `false`. Any other failure,
    /// such as permission denied, is returned.
    async fn exists(&self, follow_symlinks: bool) -> Result<bool>;

    async fn is_dir(&self) -> Result<bool>;
    async fn is_file(&self) -> Result<bool>;

    /// Whether the path is a symlink, dangling or not.
    async fn is_symlink(&self) -> Result<bool>;

    async fn is_socket(&self) -> Result<bool>;
    async fn is_fifo(&self) -> Result<bool>;
    async fn is_block_device(&self) -> Result<bool>;
    async fn is_char_device(&self) -> Result<bool>;

    /// Whether the path is a mount point. Failures mean `false`.
    async fn is_mount(&self) -> Result<bool>;

    /// Name of the file's owning user.
    async fn owner(&self) -> Result<String>;

    /// Name of the file's owning group.
    async fn group(&self) -> Result<String>;

    /// Whether both paths name the same file (same device and inode).
    async fn samefile(&self, other: &Path) -> Result<bool>;

    async fn chmod(&self, mode: u32, follow_symlinks: bool) -> Result<()>;

    /// Change the mode of a symlink itself. Not every platform allows this.
    async fn lchmod(&self, mode: u32) -> Result<()>;

    async fn mkdir(&self, options: MkdirOptions) -> Result<()>;
    async fn rmdir(&self) -> Result<()>;

    /// Create the file, or set its access and modification times to now.
    async fn touch(&self, mode: u32, exist_ok: bool) -> Result<()>;

    async fn unlink(&self, missing_ok: bool) -> Result<()>;

    /// Rename to `target`. Returns `target`.
    async fn rename(&self, target: AsyncPath) -> Result<AsyncPath>;

    /// Rename to `target`, replacing whatever is there. Returns `target`.
    async fn replace(&self, target: AsyncPath) -> Result<AsyncPath>;

    /// Where the symlink points, unresolved.
    async fn readlink(&self) -> Result<AsyncPath>;

    /// Expand a leading `~` or `~user`.
    async fn expanduser(&self) -> Result<AsyncPath>;

    /// Canonical absolute path with every symlink resolved. The path must
    /// exist.
    async fn resolve(&self) -> Result<AsyncPath>;

    /// The path made absolute against the current directory, without
    /// resolving anything.
    async fn absolute(&self) -> Result<AsyncPath>;

    /// Make this path a symlink to `target`.
    ///
    /// `target_is_directory` only matters on platforms that distinguish
    /// directory links; POSIX does not.
    async fn symlink_to(&self, target: &Path, target_is_directory: bool) -> Result<()>;

    /// Make this path a hard link to `target`.
    async fn hardlink_to(&self, target: &Path) -> Result<()>;

    async fn read_bytes(&self) -> Result<Vec<u8>>;

    /// The file's contents. Invalid UTF-8 is an `InvalidData` error.
    async fn read_text(&self) -> Result<String>;

    /// Replace the file's contents. Returns the number of bytes written.
    async fn write_bytes(&self, data: Vec<u8>) -> Result<usize>;

    /// Replace the file's contents. Returns the number of characters written.
    async fn write_text(&self, data: String) -> Result<usize>;

    /// The directory's members, each named by its bare entry name.
    async fn iterdir(&self) -> Result<IterDir>;

    /// Paths below this one matching a relative wildcard pattern.
    async fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>>;

    /// [`glob`](PathIo::glob) with the pattern applied at every depth.
    async fn rglob(&self, pattern: &str) -> Result<Vec<PathBuf>>;

    /// Open the file through tokio's async file type.
    async fn open(&self, options: &tokio::fs::OpenOptions) -> Result<tokio::fs::File>;
}

#[async_trait]
impl PathIo for AsyncPath {
    async fn stat(&self, follow_symlinks: bool) -> Result<Metadata> {
        self.offload(move |p| blocking::stat(p, follow_symlinks))
            .await
    }

    async fn lstat(&self) -> Result<Metadata> {
        self.stat(false).await
    }

    async fn exists(&self, follow_symlinks: bool) -> Result<bool> {
        self.offload(move |p| blocking::exists(p, follow_symlinks))
            .await
    }

    async fn is_dir(&self) -> Result<bool> {
        self.offload(blocking::is_dir).await
    }

    async fn is_file(&self) -> Result<bool> {
        self.offload(blocking::is_file).await
    }

    async fn is_symlink(&self) -> Result<bool> {
        self.offload(blocking::is_symlink).await
    }

    async fn is_socket(&self) -> Result<bool> {
        self.offload(blocking::is_socket).await
    }

    async fn is_fifo(&self) -> Result<bool> {
        self.offload(blocking::is_fifo).await
    }

    async fn is_block_device(&self) -> Result<bool> {
        self.offload(blocking::is_block_device).await
    }

    async fn is_char_device(&self) -> Result<bool> {
        self.offload(blocking::is_char_device).await
    }

    async fn is_mount(&self) -> Result<bool> {
        self.offload(blocking::is_mount).await
    }

    async fn owner(&self) -> Result<String> {
        self.offload(blocking::owner).await
    }

    async fn group(&self) -> Result<String> {
        self.offload(blocking::group).await
    }

    async fn samefile(&self, other: &Path) -> Result<bool> {
        let other = other.to_path_buf();
        self.offload(move |p| blocking::samefile(p, &other)).await
    }

    async fn chmod(&self, mode: u32, follow_symlinks: bool) -> Result<()> {
        self.offload(move |p| blocking::chmod(p, mode, follow_symlinks))
            .await
    }

    async fn lchmod(&self, mode: u32) -> Result<()> {
        self.chmod(mode, false).await
    }

    async fn mkdir(&self, options: MkdirOptions) -> Result<()> {
        self.offload(move |p| blocking::mkdir(p, options)).await
    }

    async fn rmdir(&self) -> Result<()> {
        self.offload(|p| std::fs::remove_dir(p)).await
    }

    async fn touch(&self, mode: u32, exist_ok: bool) -> Result<()> {
        self.offload(move |p| blocking::touch(p, mode, exist_ok))
            .await
    }

    async fn unlink(&self, missing_ok: bool) -> Result<()> {
        self.offload(move |p| blocking::unlink(p, missing_ok))
            .await
    }

    async fn rename(&self, target: AsyncPath) -> Result<AsyncPath> {
        let to = target.as_path().to_path_buf();
        self.offload(move |p| std::fs::rename(p, to)).await?;
        Ok(self.derive(target.into_pure()))
    }

    async fn replace(&self, target: AsyncPath) -> Result<AsyncPath> {
        // rename(2) already replaces an existing target on POSIX.
        self.rename(target).await
    }

    async fn readlink(&self) -> Result<AsyncPath> {
        let target = self.offload(|p| std::fs::read_link(p)).await?;
        self.derive_os(target)
    }

    async fn expanduser(&self) -> Result<AsyncPath> {
        let pure = self.as_pure().clone();
        let expanded = self.offload(move |_| blocking::expanduser(&pure)).await?;
        self.derive_os(expanded)
    }

    async fn resolve(&self) -> Result<AsyncPath> {
        let resolved = self.offload(|p| std::fs::canonicalize(p)).await?;
        self.derive_os(resolved)
    }

    async fn absolute(&self) -> Result<AsyncPath> {
        let absolute = self.offload(blocking::absolute).await?;
        self.derive_os(absolute)
    }

    async fn symlink_to(&self, target: &Path, _target_is_directory: bool) -> Result<()> {
        let target = target.to_path_buf();
        self.offload(move |p| blocking::symlink_to(p, &target))
            .await
    }

    async fn hardlink_to(&self, target: &Path) -> Result<()> {
        let target = target.to_path_buf();
        self.offload(move |p| blocking::hardlink_to(p, &target))
            .await
    }

    async fn read_bytes(&self) -> Result<Vec<u8>> {
        self.offload(|p| std::fs::read(p)).await
    }

    async fn read_text(&self) -> Result<String> {
        self.offload(|p| std::fs::read_to_string(p)).await
    }

    async fn write_bytes(&self, data: Vec<u8>) -> Result<usize> {
        self.offload(move |p| blocking::write_bytes(p, &data))
            .await
    }

    async fn write_text(&self, data: String) -> Result<usize> {
        self.offload(move |p| blocking::write_text(p, &data))
            .await
    }

    async fn iterdir(&self) -> Result<IterDir> {
        let names = self.offload(blocking::listdir).await?;
        let entries = names
            .into_iter()
            .map(PurePosixPath::parse)
            .collect::<Result<Vec<_>, _>>()?;
        log::trace!("listed {} entries under {}", entries.len(), self);
        Ok(IterDir::new(entries, self.offloader().clone()))
    }

    async fn glob(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let pattern = pattern.to_string();
        self.offload(move |p| glob::glob(p, &pattern)).await
    }

    async fn rglob(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let pattern = pattern.to_string();
        self.offload(move |p| glob::rglob(p, &pattern)).await
    }

    async fn open(&self, options: &tokio::fs::OpenOptions) -> Result<tokio::fs::File> {
        Ok(options.open(self.as_path()).await?)
    }
}
