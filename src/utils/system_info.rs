use std::fmt::Display;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum OperatingSystem {
    WINDOWS,
    LINUX,
    OSX,
    UNKNOWN,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Architecture {
    X86,
    X64,
    ARM,
    AARCH64,
    UNKNOWN,
}

impl OperatingSystem {
    pub fn get_simple_name(&self) -> &'static str {
        match self {
            OperatingSystem::WINDOWS => "windows",
            OperatingSystem::LINUX => "linux",
            OperatingSystem::OSX => "osx",
            OperatingSystem::UNKNOWN => "unknown",
        }
    }

    /// Classifies a free-form OS name such as `"Windows 11"` or `"Mac OS X"`.
    /// Anything unrecognised is reported as `UNKNOWN`.
    pub fn from_descriptor(os_name: &str) -> Self {
        let os_name = os_name.to_lowercase();
        // "darwin" contains "win", so the mac family is matched first.
        if os_name.contains("mac") || os_name.contains("darwin") || os_name.contains("osx") {
            OperatingSystem::OSX
        } else if os_name.contains("win") {
            OperatingSystem::WINDOWS
        } else if os_name.contains("linux") {
            OperatingSystem::LINUX
        } else {
            OperatingSystem::UNKNOWN
        }
    }
}

impl Display for OperatingSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.get_simple_name())
    }
}

impl Architecture {
    pub fn get_simple_name(&self) -> &'static str {
        match self {
            Architecture::X86 => "x86",
            Architecture::X64 => "x64",
            Architecture::ARM => "arm",
            Architecture::AARCH64 => "aarch64",
            Architecture::UNKNOWN => "unknown",
        }
    }

    pub fn from_descriptor(arch: &str) -> Self {
        let arch = arch.to_lowercase();
        if arch.contains("aarch64") || arch.contains("arm64") {
            Architecture::AARCH64
        } else if arch.contains("arm") {
            Architecture::ARM
        } else if arch.contains("x86_64") || arch.contains("amd64") || arch.contains("x64") {
            Architecture::X64
        } else if arch.contains("x86") || arch.contains("i386") || arch.contains("i686") {
            Architecture::X86
        } else {
            Architecture::UNKNOWN
        }
    }

    pub fn is_arm_family(&self) -> bool {
        matches!(self, Architecture::ARM | Architecture::AARCH64)
    }
}

impl Display for Architecture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.get_simple_name())
    }
}

pub const OS: OperatingSystem = if cfg!(target_os = "windows") {
    OperatingSystem::WINDOWS
} else if cfg!(target_os = "macos") {
    OperatingSystem::OSX
} else if cfg!(target_os = "linux") {
    OperatingSystem::LINUX
} else {
    OperatingSystem::UNKNOWN
};

pub const ARCHITECTURE: Architecture = if cfg!(target_arch = "x86") {
    Architecture::X86
} else if cfg!(target_arch = "x86_64") {
    Architecture::X64
} else if cfg!(target_arch = "arm") {
    Architecture::ARM
} else if cfg!(target_arch = "aarch64") {
    Architecture::AARCH64
} else {
    Architecture::UNKNOWN
};

/// Selects which per-platform client configuration the repository serves.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PlatformTag {
    Windows,
    Mac,
    MacAarch64,
    Linux,
}

impl PlatformTag {
    /// Everything that is neither Windows nor macOS gets the linux artifact.
    pub fn for_system(os: OperatingSystem, arch: Architecture) -> Self {
        match os {
            OperatingSystem::WINDOWS => PlatformTag::Windows,
            OperatingSystem::OSX if arch.is_arm_family() => PlatformTag::MacAarch64,
            OperatingSystem::OSX => PlatformTag::Mac,
            OperatingSystem::LINUX | OperatingSystem::UNKNOWN => PlatformTag::Linux,
        }
    }

    pub fn from_descriptors(os_name: &str, arch: &str) -> Self {
        Self::for_system(
            OperatingSystem::from_descriptor(os_name),
            Architecture::from_descriptor(arch),
        )
    }

    pub fn current() -> Self {
        Self::for_system(OS, ARCHITECTURE)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformTag::Windows => "win",
            PlatformTag::Mac => "mac",
            PlatformTag::MacAarch64 => "mac-aarch64",
            PlatformTag::Linux => "linux",
        }
    }
}

impl Display for PlatformTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_tag_from_descriptors() {
        assert_eq!(PlatformTag::from_descriptors("Windows 11", "x86_64").as_str(), "win");
        assert_eq!(
            PlatformTag::from_descriptors("Mac OS X", "aarch64").as_str(),
            "mac-aarch64"
        );
        assert_eq!(PlatformTag::from_descriptors("Mac OS X", "x86_64").as_str(), "mac");
        assert_eq!(PlatformTag::from_descriptors("Linux", "x86_64").as_str(), "linux");
    }

    #[test]
    fn test_platform_tag_edge_descriptors() {
        assert_eq!(PlatformTag::from_descriptors("Darwin", "arm64"), PlatformTag::MacAarch64);
        assert_eq!(PlatformTag::from_descriptors("Mac OS X", "arm"), PlatformTag::MacAarch64);
        assert_eq!(PlatformTag::from_descriptors("FreeBSD", "amd64"), PlatformTag::Linux);
        assert_eq!(PlatformTag::from_descriptors("Windows 10", "aarch64"), PlatformTag::Windows);
    }

    #[test]
    fn test_current_platform_matches_build_target() {
        let tag = PlatformTag::current();
        if cfg!(target_os = "windows") {
            assert_eq!(tag, PlatformTag::Windows);
        } else if cfg!(target_os = "macos") {
            assert!(matches!(tag, PlatformTag::Mac | PlatformTag::MacAarch64));
        } else {
            assert_eq!(tag, PlatformTag::Linux);
        }
    }
}
