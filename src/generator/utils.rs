use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use log::debug;
use walkdir::WalkDir;

/// Removes `dir` with everything inside it, then creates it again empty.
pub(super) fn reset_dir(dir: &Path) -> anyhow::Result<()> {
    fs_extra::dir::remove(dir).with_context(|| format!("while removing {dir:?}"))?;
    create_dir(dir)
}

pub(super) fn create_dir(dir: &Path) -> anyhow::Result<()> {
    fs_extra::dir::create_all(dir, false).with_context(|| format!("while creating {dir:?}"))
}

/// Copies the contents of `src` into `dst`, recreating symbolic links as links.
pub(super) fn copy_tree(src: &Path, dst: &Path) -> anyhow::Result<()> {
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry.with_context(|| format!("while walking {src:?}"))?;
        let target = dst.join(entry.path().strip_prefix(src)?);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            create_dir(&target)?;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)
                .with_context(|| format!("while copying {:?} to {target:?}", entry.path()))?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn copy_symlink(link: &Path, target: &Path) -> anyhow::Result<()> {
    let points_to = fs::read_link(link).with_context(|| format!("while reading link {link:?}"))?;
    std::os::unix::fs::symlink(&points_to, target)
        .with_context(|| format!("while linking {target:?} to {points_to:?}"))
}

#[cfg(not(unix))]
fn copy_symlink(link: &Path, target: &Path) -> anyhow::Result<()> {
    if link.is_dir() {
        create_dir(target)?;
        copy_tree(link, target)
    } else if link.exists() {
        fs::copy(link, target).with_context(|| format!("while copying {link:?} to {target:?}"))?;
        Ok(())
    } else {
        log::warn!("{link:?} is a dangling link. skipping...");
        Ok(())
    }
}

/// Creates (or truncates) `path` and hands a buffered writer for it to `render`.
/// The file is flushed and closed before returning, on success and on error.
pub(super) fn write_file<F>(path: &Path, render: F) -> anyhow::Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> anyhow::Result<()>,
{
    let fd = File::create(path).with_context(|| format!("while creating {path:?}"))?;
    let mut writer = BufWriter::new(fd);
    render(&mut writer).with_context(|| format!("while generating {path:?}"))?;
    writer
        .flush()
        .with_context(|| format!("while writing {path:?}"))?;

    debug!("Wrote {path:?}");
    Ok(())
}
