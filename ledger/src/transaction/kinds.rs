//! Enumerated wire codes: transaction kinds, tokens, wallet tags.
//!
//! Each enum is closed — the set is fixed by the wire protocol — and every
//! code arriving off the wire goes through `from_code`, which rejects
//! anything outside the set instead of smuggling it through as a raw
//! integer.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// An integer code with no counterpart in the protocol's closed enums.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind} code {code}")]
pub struct UnknownCode {
    pub kind: &'static str,
    pub code: u16,
}

/// A name with no counterpart in the protocol's closed enums.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind} name `{name}`")]
pub struct UnknownName {
    pub kind: &'static str,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Kind
// ---------------------------------------------------------------------------

/// The 2-byte transaction kind tag.
///
/// The discriminants are the wire codes; the long names (`…Transaction`)
/// are the canonical text forms used by node RPC and explorers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Kind {
    RegisterNode = 0,
    UnregisterNode = 1,
    TransferAsset = 2,
    RegisterSysWallet = 3,
    UnregisterSysWallet = 4,
    UserData = 5,
    DistributionFee = 6,
}

impl Kind {
    pub const ALL: [Kind; 7] = [
        Kind::RegisterNode,
        Kind::UnregisterNode,
        Kind::TransferAsset,
        Kind::RegisterSysWallet,
        Kind::UnregisterSysWallet,
        Kind::UserData,
        Kind::DistributionFee,
    ];

    pub fn code(self) -> u16 {
        self as u16
    }

    pub fn from_code(code: u16) -> Result<Self, UnknownCode> {
        Self::ALL
            .into_iter()
            .find(|k| k.code() == code)
            .ok_or(UnknownCode {
                kind: "transaction",
                code,
            })
    }

    /// The canonical long name, e.g. `TransferAssetsTransaction`.
    pub fn name(self) -> &'static str {
        match self {
            Kind::RegisterNode => "RegisterNodeTransaction",
            Kind::UnregisterNode => "UnregisterNodeTransaction",
            Kind::TransferAsset => "TransferAssetsTransaction",
            Kind::RegisterSysWallet => "RegisterSystemWalletTransaction",
            Kind::UnregisterSysWallet => "UnregisterSystemWalletTransaction",
            Kind::UserData => "UserDataTransaction",
            Kind::DistributionFee => "DistributionFeeTransaction",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Kind {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| UnknownName {
                kind: "transaction",
                name: s.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// Token
// ---------------------------------------------------------------------------

/// The asset a transfer moves: the utility token or the gold-backed token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Token {
    Utility = 0,
    Gold = 1,
}

impl Token {
    pub fn code(self) -> u16 {
        self as u16
    }

    pub fn from_code(code: u16) -> Result<Self, UnknownCode> {
        match code {
            0 => Ok(Token::Utility),
            1 => Ok(Token::Gold),
            _ => Err(UnknownCode {
                kind: "token",
                code,
            }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Token::Utility => "Utility",
            Token::Gold => "Gold",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Token {
    type Err = UnknownName;

    /// Accepts the canonical names, historical aliases, and bare codes,
    /// case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "0" | "utility" | "mnt" | "mint" => Ok(Token::Utility),
            "1" | "gold" | "commodity" => Ok(Token::Gold),
            _ => Err(UnknownName {
                kind: "token",
                name: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// WalletTag
// ---------------------------------------------------------------------------

/// Roles a system wallet can be tagged with.
///
/// On the wire the tag travels as a single byte inside the sys-wallet
/// transactions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WalletTag {
    /// Node wallet.
    Node = 0,
    /// Genesis node wallet.
    GenesisNode = 1,
    /// Controller wallet that may tag other wallets.
    Supervisor = 2,
    /// Fee accumulator.
    Owner = 3,
    /// Emits token without a fee.
    Emission = 4,
    /// May send user-data transactions without a fee.
    Data = 5,
}

impl WalletTag {
    pub const ALL: [WalletTag; 6] = [
        WalletTag::Node,
        WalletTag::GenesisNode,
        WalletTag::Supervisor,
        WalletTag::Owner,
        WalletTag::Emission,
        WalletTag::Data,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Result<Self, UnknownCode> {
        Self::ALL
            .into_iter()
            .find(|t| t.code() == code)
            .ok_or(UnknownCode {
                kind: "wallet tag",
                code: code.into(),
            })
    }

    pub fn name(self) -> &'static str {
        match self {
            WalletTag::Node => "Node",
            WalletTag::GenesisNode => "GenesisNode",
            WalletTag::Supervisor => "SupervisorWallet",
            WalletTag::Owner => "OwnerWallet",
            WalletTag::Emission => "EmissionWallet",
            WalletTag::Data => "DataWallet",
        }
    }
}

impl fmt::Display for WalletTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WalletTag {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| UnknownName {
                kind: "wallet tag",
                name: s.to_string(),
            })
    }
}
