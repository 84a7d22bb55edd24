//! Parser policy flags (the closed set from spec §6).

/// Selects which `Skipper` backend the structural skipper uses.
///
/// `Runtime` auto-selects: SIMD when `locant-simd` is linked in and the
/// current CPU supports it, scalar otherwise. `ScalarOnly` forces the
/// pure-scalar backend (the only one evaluable in a `const` context, per
/// spec §6). `Simd` forces the vectorized backend and panics at schema-build
/// time if none is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecMode {
    /// Auto-select the fastest available backend.
    #[default]
    Runtime,
    /// Force the portable scalar skipper.
    ScalarOnly,
    /// Force a SIMD-accelerated skipper.
    Simd,
}

/// Policy flags threaded through every parse.
///
/// Cheap to copy; build once and reuse across many calls to `from_json`,
/// the way a `CompiledSchema` is built once and reused across many parses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Enables bounds and well-formedness checks on hot paths.
    ///
    /// When `false`, the parser trusts the caller that the input is
    /// well-formed; malformed input then yields an unspecified `Result`
    /// rather than a guaranteed error (never a memory-safety violation --
    /// see `ByteSource`'s sentinel contract).
    pub checked: bool,
    /// Enables escape handling inside member names (string values are
    /// always escape-aware, regardless of this flag).
    pub allow_escaped_names: bool,
    /// Selects the structural skipper backend.
    pub exec_mode: ExecMode,
    /// When `true`, an unrecognized member name is a hard `UnknownMember`
    /// error. When `false` (the default), unknown members are skipped.
    pub reject_unknown_members: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            checked: true,
            allow_escaped_names: false,
            exec_mode: ExecMode::Runtime,
            reject_unknown_members: false,
        }
    }
}

impl ParseOptions {
    /// The default checked, strict-not-required policy set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with `checked` set to `false`.
    #[must_use]
    pub const fn unchecked(mut self) -> Self {
        self.checked = false;
        self
    }

    /// Returns a copy with `allow_escaped_names` set to `true`.
    #[must_use]
    pub const fn with_escaped_names(mut self) -> Self {
        self.allow_escaped_names = true;
        self
    }

    /// Returns a copy with `reject_unknown_members` set to `true`.
    #[must_use]
    pub const fn strict_members(mut self) -> Self {
        self.reject_unknown_members = true;
        self
    }

    /// Returns a copy with the given execution mode.
    #[must_use]
    pub const fn with_exec_mode(mut self, mode: ExecMode) -> Self {
        self.exec_mode = mode;
        self
    }
}
