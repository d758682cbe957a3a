//! SQL fragment emission.
//!
//! Each reference renders one fragment per clause [`SqlRole`]. The
//! [`SqlRoles`] flag set mirrors the legacy combinable constants; it is
//! resolved to a single role before emission.

mod emitter;


use bitflags::bitflags;

/// Clause a fragment is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlRole {
    /// Item of the SELECT list.
    Select,
    /// Item of the FROM list.
    From,
    /// Operand in WHERE or at the end of an expression.
    Where,
    /// Entire view body. Only definition expressions render differently.
    ViewDefinition,
}

impl SqlRole {
    pub fn as_str(self) -> &'static str {
        match self {
            SqlRole::Select => "select",
            SqlRole::From => "from",
            SqlRole::Where => "where",
            SqlRole::ViewDefinition => "view-def",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "select" => Some(SqlRole::Select),
            "from" => Some(SqlRole::From),
            "where" | "end-expr" => Some(SqlRole::Where),
            "view-def" => Some(SqlRole::ViewDefinition),
            _ => None,
        }
    }
}

bitflags! {
    /// Combinable role flags, bit-compatible with the legacy constants.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SqlRoles: u8 {
        const WHERE = 1;
        const SELECT = 2;
        const FROM = 4;
        const END_EXPR = 8;
        const VIEW_DEF = 16;
    }
}

impl SqlRoles {
    /// Pick the single role a combined request stands for.
    ///
    /// VIEW_DEF wins when the reference is a definition expression; after
    /// that FROM, SELECT, then WHERE/END_EXPR. A lone VIEW_DEF on anything
    /// else still resolves to [`SqlRole::ViewDefinition`]. Unknown bits are
    /// ignored; nothing left means no role.
    pub fn resolve(self, is_def_expr: bool) -> Option<SqlRole> {
        let roles = Self::from_bits_truncate(self.bits());
        if roles.contains(Self::VIEW_DEF) && is_def_expr {
            Some(SqlRole::ViewDefinition)
        } else if roles.contains(Self::FROM) {
            Some(SqlRole::From)
        } else if roles.contains(Self::SELECT) {
            Some(SqlRole::Select)
        } else if roles.intersects(Self::WHERE | Self::END_EXPR) {
            Some(SqlRole::Where)
        } else if roles.contains(Self::VIEW_DEF) {
            Some(SqlRole::ViewDefinition)
        } else {
            None
        }
    }
}

impl From<SqlRole> for SqlRoles {
    fn from(role: SqlRole) -> Self {
        match role {
            SqlRole::Select => SqlRoles::SELECT,
            SqlRole::From => SqlRoles::FROM,
            SqlRole::Where => SqlRoles::WHERE,
            SqlRole::ViewDefinition => SqlRoles::VIEW_DEF,
        }
    }
}
