//! Cipher relation selection.

use std::fmt::{self, Display};

/// Which neighbor relation a transform draws its substitutions from.
///
/// A closed enumeration; every dispatch over it is exhaustive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Substitute from the symmetric *surround* relation. Encoding and
    /// decoding are the same operation under this mode.
    #[default]
    Reversible,
    /// Substitute from *encrypts-to*: the keys that decipher to this one.
    Encrypt,
    /// Substitute from *deciphers-to*: the non-blank neighbors of this key.
    Decipher,
    /// No substitution; known symbols pass through unchanged.
    Echo,
}

impl Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Reversible => "reversible",
            Self::Encrypt => "encrypt",
            Self::Decipher => "decipher",
            Self::Echo => "echo",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_and_display() {
        assert_eq!(Mode::default(), Mode::Reversible);
        assert_eq!(Mode::Encrypt.to_string(), "encrypt");
        assert_eq!(Mode::Echo.to_string(), "echo");
    }
}
