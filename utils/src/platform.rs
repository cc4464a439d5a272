use std::str::FromStr;

use miette::bail;

/// A linux platform an image variant can be built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    LinuxAmd64,
    LinuxAmd64V2,
    LinuxArm64,
    LinuxArm64V8,
    LinuxArm,
    LinuxArmV5,
    LinuxArmV6,
    LinuxArmV7,
    Linux386,
    LinuxPpc64le,
    LinuxRiscv64,
    LinuxS390x,
}

impl Platform {
    /// The architecture of the platform.
    #[must_use]
    pub const fn arch(&self) -> &str {
        match *self {
            Self::LinuxAmd64 | Self::LinuxAmd64V2 => "amd64",
            Self::LinuxArm64 | Self::LinuxArm64V8 => "arm64",
            Self::LinuxArm | Self::LinuxArmV5 | Self::LinuxArmV6 | Self::LinuxArmV7 => "arm",
            Self::Linux386 => "386",
            Self::LinuxPpc64le => "ppc64le",
            Self::LinuxRiscv64 => "riscv64",
            Self::LinuxS390x => "s390x",
        }
    }

    /// The variant of the platform.
    #[must_use]
    pub const fn variant(&self) -> Option<&str> {
        match *self {
            Self::LinuxAmd64V2 => Some("v2"),
            Self::LinuxArm64V8 => Some("v8"),
            Self::LinuxArmV5 => Some("v5"),
            Self::LinuxArmV6 => Some("v6"),
            Self::LinuxArmV7 => Some("v7"),
            _ => None,
        }
    }

    /// The platform written the way registries list
    /// architectures, without the OS prefix.
    ///
    /// `linux/arm/v7` becomes `arm/v7`.
    #[must_use]
    pub fn registry_arch(&self) -> String {
        self.variant().map_or_else(
            || self.arch().to_string(),
            |variant| format!("{}/{variant}", self.arch()),
        )
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match *self {
                Self::LinuxAmd64 => "linux/amd64",
                Self::LinuxAmd64V2 => "linux/amd64/v2",
                Self::LinuxArm64 => "linux/arm64",
                Self::LinuxArm64V8 => "linux/arm64/v8",
                Self::LinuxArm => "linux/arm",
                Self::LinuxArmV5 => "linux/arm/v5",
                Self::LinuxArmV6 => "linux/arm/v6",
                Self::LinuxArmV7 => "linux/arm/v7",
                Self::Linux386 => "linux/386",
                Self::LinuxPpc64le => "linux/ppc64le",
                Self::LinuxRiscv64 => "linux/riscv64",
                Self::LinuxS390x => "linux/s390x",
            }
        )
    }
}

impl FromStr for Platform {
    type Err = miette::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "linux/amd64" => Self::LinuxAmd64,
            "linux/amd64/v2" => Self::LinuxAmd64V2,
            "linux/arm64" => Self::LinuxArm64,
            "linux/arm64/v8" => Self::LinuxArm64V8,
            "linux/arm" => Self::LinuxArm,
            "linux/arm/v5" => Self::LinuxArmV5,
            "linux/arm/v6" => Self::LinuxArmV6,
            "linux/arm/v7" => Self::LinuxArmV7,
            "linux/386" => Self::Linux386,
            "linux/ppc64le" => Self::LinuxPpc64le,
            "linux/riscv64" => Self::LinuxRiscv64,
            "linux/s390x" => Self::LinuxS390x,
            platform => bail!("Platform {platform} unsupported"),
        })
    }
}
