use serde::Serialize;
use std::fmt;

/// Git mode used for directories, real or virtual.
pub const DIR_MODE: u32 = 0o040000;

/// Kind of resource behind a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResourceType {
    Unknown = 0,
    Directory = 1,
    File = 2,
}

/// Unix-style permissions derived from a git file mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permissions {
    mode: u32,
}

const PERMISSION_BITS: [(&str, u32); 12] = [
    ("u_r", 0o400),
    ("u_w", 0o200),
    ("u_x", 0o100),
    ("g_r", 0o040),
    ("g_w", 0o020),
    ("g_x", 0o010),
    ("o_r", 0o004),
    ("o_w", 0o002),
    ("o_x", 0o001),
    ("sticky", 0o1000),
    ("setguid", 0o2000),
    ("setuid", 0o4000),
];

impl Permissions {
    /// Keeps the permission bits of `mode` and discards the file type.
    pub fn from_mode(mode: u32) -> Self {
        Permissions { mode: mode & 0o7777 }
    }

    pub fn mode(&self) -> u32 {
        self.mode
    }

    /// Sorted names of the granted permissions (`u_r`, `g_x`, `setuid`, ...).
    pub fn dump(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = PERMISSION_BITS
            .iter()
            .filter(|(_, bit)| self.mode & bit != 0)
            .map(|(name, _)| *name)
            .collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chars = ['r', 'w', 'x'];
        for (i, (_, bit)) in PERMISSION_BITS.iter().take(9).enumerate() {
            let c = if self.mode & bit != 0 { chars[i % 3] } else { '-' };
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

/// Resource information for a path.
///
/// Carries the `basic`, `details` and `access` namespaces. Nothing in a
/// git filesystem can be modified, so no key is ever writeable.
#[derive(Debug, Clone, PartialEq)]
pub struct Info {
    name: String,
    is_dir: bool,
    size: u64,
    permissions: Permissions,
}

impl Info {
    pub fn directory(name: impl Into<String>, size: u64) -> Self {
        Info {
            name: name.into(),
            is_dir: true,
            size,
            permissions: Permissions::from_mode(DIR_MODE),
        }
    }

    pub fn file(name: impl Into<String>, size: u64, mode: u32) -> Self {
        Info {
            name: name.into(),
            is_dir: false,
            size,
            permissions: Permissions::from_mode(mode),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    pub fn is_file(&self) -> bool {
        !self.is_dir
    }

    pub fn resource_type(&self) -> ResourceType {
        if self.is_dir {
            ResourceType::Directory
        } else {
            ResourceType::File
        }
    }

    /// Size of the underlying git object in bytes; zero for virtual directories.
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn permissions(&self) -> Permissions {
        self.permissions
    }

    pub fn has_namespace(&self, namespace: &str) -> bool {
        matches!(namespace, "basic" | "details" | "access")
    }

    pub fn is_writeable(&self, _namespace: &str, _key: &str) -> bool {
        false
    }
}

/// Filesystem meta information for the `standard` namespace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Meta {
    pub case_insensitive: bool,
    pub invalid_path_chars: String,
    pub max_path_length: Option<u64>,
    pub max_sys_path_length: Option<u64>,
    pub network: bool,
    pub read_only: bool,
    pub supports_rename: bool,
    pub thread_safe: bool,
    pub unicode_paths: bool,
    #[serde(rename = "virtual")]
    pub is_virtual: bool,
}

impl Meta {
    pub fn standard() -> Self {
        Meta {
            case_insensitive: false,
            invalid_path_chars: crate::path::INVALID_PATH_CHARS.to_string(),
            max_path_length: None,
            max_sys_path_length: None,
            network: false,
            read_only: true,
            supports_rename: false,
            thread_safe: true,
            unicode_paths: true,
            is_virtual: false,
        }
    }
}
