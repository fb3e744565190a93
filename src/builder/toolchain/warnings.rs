//! Curated compiler warnings injected into every toolchain.

use std::fmt;

/// A warning class the toolchain enables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningFlag {
    All,
    Extra,
    Shadow,
    NonVirtualDtor,
    CastAlign,
    Unused,
    OverloadedVirtual,
    Pedantic,
    Conversion,
    SignConversion,
    NullDereference,
    DoublePromotion,
    Format,
    ImplicitFallthrough,
}

/// The curated warning set, in emission order.
///
/// Downstream tools treat a later flag as overriding an earlier one with
/// the same prefix, so this order is emitted verbatim.
pub const CURATED_WARNINGS: [WarningFlag; 14] = [
    WarningFlag::All,
    WarningFlag::Extra,
    WarningFlag::Shadow,
    WarningFlag::NonVirtualDtor,
    WarningFlag::CastAlign,
    WarningFlag::Unused,
    WarningFlag::OverloadedVirtual,
    WarningFlag::Pedantic,
    WarningFlag::Conversion,
    WarningFlag::SignConversion,
    WarningFlag::NullDereference,
    WarningFlag::DoublePromotion,
    WarningFlag::Format,
    WarningFlag::ImplicitFallthrough,
];

impl WarningFlag {
    /// The compiler flag.
    pub fn as_flag(&self) -> &'static str {
        match self {
            WarningFlag::All => "-Wall",
            WarningFlag::Extra => "-Wextra",
            WarningFlag::Shadow => "-Wshadow",
            WarningFlag::NonVirtualDtor => "-Wnon-virtual-dtor",
            WarningFlag::CastAlign => "-Wcast-align",
            WarningFlag::Unused => "-Wunused",
            WarningFlag::OverloadedVirtual => "-Woverloaded-virtual",
            WarningFlag::Pedantic => "-Wpedantic",
            WarningFlag::Conversion => "-Wconversion",
            WarningFlag::SignConversion => "-Wsign-conversion",
            WarningFlag::NullDereference => "-Wnull-dereference",
            WarningFlag::DoublePromotion => "-Wdouble-promotion",
            WarningFlag::Format => "-Wformat=2",
            WarningFlag::ImplicitFallthrough => "-Wimplicit-fallthrough",
        }
    }

    /// What the warning catches.
    pub fn description(&self) -> &'static str {
        match self {
            WarningFlag::All => "common warnings",
            WarningFlag::Extra => "extra warnings beyond -Wall",
            WarningFlag::Shadow => "a declaration shadows one from a parent scope",
            WarningFlag::NonVirtualDtor => {
                "a class with virtual functions has a non-virtual destructor"
            }
            WarningFlag::CastAlign => "casts that raise the required alignment",
            WarningFlag::Unused => "unused variables, functions, parameters and values",
            WarningFlag::OverloadedVirtual => "a virtual function is overloaded, not overridden",
            WarningFlag::Pedantic => "non-standard language extensions",
            WarningFlag::Conversion => "implicit conversions that may lose data",
            WarningFlag::SignConversion => "implicit conversions that change sign",
            WarningFlag::NullDereference => "paths that dereference a null pointer",
            WarningFlag::DoublePromotion => "float implicitly promoted to double",
            WarningFlag::Format => "printf/scanf format string misuse",
            WarningFlag::ImplicitFallthrough => "switch fallthrough without an annotation",
        }
    }
}

impl fmt::Display for WarningFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_flag())
    }
}

/// Whether a warning stops the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningSeverity {
    NonFatal,
    Fatal,
}

impl WarningSeverity {
    pub fn from_switch(warnings_as_errors: bool) -> Self {
        if warnings_as_errors {
            WarningSeverity::Fatal
        } else {
            WarningSeverity::NonFatal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WarningSeverity::NonFatal => "warning",
            WarningSeverity::Fatal => "error",
        }
    }
}
