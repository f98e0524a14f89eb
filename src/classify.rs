/*!
 * Binary file classification by name suffix
 */

use once_cell::sync::Lazy;

/// Suffixes (and a few literal file names) treated as binary by default
pub static DEFAULT_BINARY_EXTENSIONS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        // Compiled executables and libraries
        ".exe", ".dll", ".so", ".a", ".lib", ".dylib", ".o", ".obj",
        // Compressed archives
        ".zip", ".tar", ".tar.gz", ".tgz", ".rar", ".7z", ".bz2", ".gz", ".xz", ".z", ".lz",
        ".lzma", ".lzo", ".rz", ".sz", ".dz",
        // Office documents
        ".pdf", ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx", ".odt", ".ods", ".odp",
        // Media
        ".png", ".jpg", ".jpeg", ".gif", ".mp3", ".mp4", ".wav", ".flac", ".ogg", ".avi",
        ".mkv", ".mov", ".webm", ".wmv", ".m4a", ".aac",
        // VM and container images
        ".iso", ".vmdk", ".qcow2", ".vdi", ".vhd", ".vhdx", ".ova", ".ovf",
        // Databases
        ".db", ".sqlite", ".mdb", ".accdb", ".frm", ".ibd", ".dbf",
        // Java
        ".jar", ".class", ".war", ".ear", ".jpi",
        // Python bytecode and packages
        ".pyc", ".pyo", ".pyd", ".egg", ".whl",
        // Packages and installers
        ".deb", ".rpm", ".apk", ".msi", ".dmg", ".pkg", ".bin", ".dat", ".data", ".dump",
        ".img", ".toast", ".vcd", ".crx", ".xpi", ".lock", ".lockb", "package-lock.json",
        "pnpm-lock.yaml",
        // Fonts and icons
        ".svg", ".eot", ".otf", ".ttf", ".woff", ".woff2", ".ico", ".icns", ".cur",
        // Windows installers and dumps
        ".cab", ".dmp", ".msp", ".msm",
        // Keys and certificates
        ".keystore", ".jks", ".truststore", ".cer", ".crt", ".der", ".p7b", ".p7c", ".p12",
        ".pfx", ".pem", ".csr", ".key", ".pub", ".sig", ".pgp", ".gpg",
        // App bundles
        ".nupkg", ".snupkg", ".appx", ".msix", ".msu", ".snap", ".flatpak", ".appimage",
        // Kernel modules and flash
        ".ko", ".sys", ".elf", ".swf", ".fla", ".swc",
        // Build artifacts and debug info
        ".rlib", ".pdb", ".idb", ".dbg", ".sdf", ".bak", ".tmp", ".temp", ".log", ".tlog",
        ".ilk", ".bpl", ".dcu", ".dcp", ".dcpil", ".drc", ".aps", ".res", ".rsrc", ".rc",
        ".resx",
        // Settings files
        ".prefs", ".properties", ".ini", ".cfg", ".config", ".conf",
        // VCS and OS metadata
        ".DS_Store", ".localized", ".svn", ".git", ".gitignore", ".gitkeep",
    ]
});

/// Set of name suffixes whose files are never read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryExtensions {
    suffixes: Vec<String>,
}

impl Default for BinaryExtensions {
    fn default() -> Self {
        Self::new(DEFAULT_BINARY_EXTENSIONS.iter().copied())
    }
}

impl BinaryExtensions {
    /// Create a set from explicit suffixes
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            suffixes: suffixes.into_iter().map(Into::into).collect(),
        }
    }

    /// Add more suffixes to the set, ignoring blanks and duplicates
    pub fn extend<I, S>(&mut self, suffixes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for suffix in suffixes {
            let suffix = suffix.into();
            if !suffix.is_empty() && !self.suffixes.contains(&suffix) {
                self.suffixes.push(suffix);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.suffixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty()
    }

    /// Whether a path names a binary file (case-sensitive suffix match on the file name)
    pub fn is_binary(&self, path: &str) -> bool {
        let name = path.rsplit('/').next().unwrap_or(path);
        self.suffixes.iter().any(|suffix| name.ends_with(suffix.as_str()))
    }
}

/// Classify a path against a set of binary extensions
pub fn classify(path: &str, extensions: &BinaryExtensions) -> bool {
    extensions.is_binary(path)
}
