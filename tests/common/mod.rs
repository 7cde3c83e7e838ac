#![allow(dead_code)]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }

    /// Reads a file under the workspace back as UTF-8 text.
    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.temp_dir.path().join(name)).expect("read temp file")
    }

    /// Whether a file with this name exists under the workspace.
    pub fn exists(&self, name: &str) -> bool {
        self.temp_dir.path().join(name).exists()
    }
}

/// A small order file using the default locked column names.
pub const ORDER_CSV: &str = "\
Номер,Код EAN/UPC,Завод,Дата документа
1,123,A,2024-01-05
2,999,B,2024-01-05
3,123,C,2024-01-06
4,555,a,2024-01-06
";

/// Mapping file: new value first, old value second.
pub const MAPPING_CSV: &str = "\
ძირითადი შტრიხკოდი,შტრიხკოდი
X1,123
";

/// Schedule file: shop C has unrecognized weekday text on purpose.
pub const SCHEDULE_CSV: &str = "\
shop_code,allowed_weekday
A,Monday
C,Someday
";
