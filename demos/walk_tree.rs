//! Print a directory tree with sizes, indenting by depth.
//!
//! ```text
//! cargo run --example walk_tree -- /some/dir
//! RUST_LOG=tierfs=trace cargo run --example walk_tree -- /some/dir
//! ```

use std::path::{Path, PathBuf};

use tierfs::{FileInfo, FileSystem, FsError, LocalDriver, Visitor, WalkControl, WalkOptions};
use tracing_subscriber::EnvFilter;

struct TreePrinter {
    depth: usize,
    files: usize,
    bytes: u64,
}

impl Visitor for TreePrinter {
    type Error = FsError;

    fn visit_file(&mut self, _: &Path, info: &FileInfo, _: bool) -> Result<(), FsError> {
        let indent = "  ".repeat(self.depth);
        if info.is_dir() {
            println!("{indent}{}/", info.name);
        } else {
            println!("{indent}{} ({} bytes)", info.name, info.size);
            self.files += 1;
            self.bytes += info.size;
        }
        Ok(())
    }

    fn enter_dir(&mut self, _: &Path, info: &FileInfo, is_root: bool) -> Result<WalkControl, FsError> {
        // Hidden directories are listed but not entered.
        if !is_root && info.name.starts_with('.') {
            return Ok(WalkControl::SkipSubtree);
        }
        self.depth += 1;
        Ok(WalkControl::Continue)
    }

    fn leave_dir(&mut self, _: &Path, _: &FileInfo, _: bool) -> Result<(), FsError> {
        self.depth -= 1;
        Ok(())
    }
}

fn main() -> Result<(), FsError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let root = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let fs = FileSystem::new(LocalDriver::rooted(&root)?);
    let mut printer = TreePrinter {
        depth: 0,
        files: 0,
        bytes: 0,
    };
    let options = WalkOptions::new()
        .visit_root_dir(true)
        .enter_leave_callbacks_for_root(true);
    fs.walk(Path::new("/"), &options, &mut printer)?;

    println!("{} files, {} bytes", printer.files, printer.bytes);
    Ok(())
}
