//! Operators and type tests.

use crate::Operator;

/// Prefix operators that compute a new value.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    /// `-x`
    Neg,
    /// `!x`
    Not,
    /// `~x`
    BitNot,
}

impl UnaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
            UnaryOp::BitNot => "~",
        }
    }
}

/// Operators that read a reference, compute and store back (`++ -- !!`).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UpdateOp {
    Increment,
    Decrement,
    /// `!!`, flips a boolean in place.
    Toggle,
}

impl UpdateOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            UpdateOp::Increment => "++",
            UpdateOp::Decrement => "--",
            UpdateOp::Toggle => "!!",
        }
    }

    pub fn from_operator(op: Operator) -> Option<UpdateOp> {
        match op {
            Operator::DoublePlus => Some(UpdateOp::Increment),
            Operator::DoubleMinus => Some(UpdateOp::Decrement),
            Operator::DoubleBang => Some(UpdateOp::Toggle),
            _ => None,
        }
    }
}

/// Eagerly evaluated binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    BitAnd,
    BitOr,
    BitXor,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    In,
}

impl BinaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Pow => "**",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::In => "in",
        }
    }

    /// Operator applied by a compound assignment token (`+=` and friends).
    pub fn from_compound_assign(op: Operator) -> Option<BinaryOp> {
        match op {
            Operator::PlusAssign => Some(BinaryOp::Add),
            Operator::MinusAssign => Some(BinaryOp::Sub),
            Operator::StarAssign => Some(BinaryOp::Mul),
            Operator::SlashAssign => Some(BinaryOp::Div),
            Operator::PercentAssign => Some(BinaryOp::Mod),
            Operator::AndAssign => Some(BinaryOp::BitAnd),
            Operator::OrAssign => Some(BinaryOp::BitOr),
            Operator::XorAssign => Some(BinaryOp::BitXor),
            _ => None,
        }
    }
}

/// Short-circuiting operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            LogicalOp::And => "&&",
            LogicalOp::Or => "||",
        }
    }
}

/// Right-hand side of `value is <type>`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeTest {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
    Function,
}

impl TypeTest {
    pub const fn name(self) -> &'static str {
        match self {
            TypeTest::Null => "null",
            TypeTest::Boolean => "boolean",
            TypeTest::Number => "number",
            TypeTest::String => "string",
            TypeTest::Array => "array",
            TypeTest::Object => "object",
            TypeTest::Function => "function",
        }
    }

    /// Type named by a bare word after `is`. `null` is a keyword and handled
    /// by the parser separately.
    pub fn from_word(word: &str) -> Option<TypeTest> {
        match word {
            "boolean" => Some(TypeTest::Boolean),
            "number" => Some(TypeTest::Number),
            "string" => Some(TypeTest::String),
            "array" => Some(TypeTest::Array),
            "object" => Some(TypeTest::Object),
            "function" => Some(TypeTest::Function),
            _ => None,
        }
    }
}
