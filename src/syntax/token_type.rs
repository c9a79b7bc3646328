use std::fmt;

macro_rules! define_tokens {
    (
        symbols { $($sym_name:ident => $sym_str:literal),* $(,)? }
        keywords { $($kw_name:ident => $kw_str:literal),* $(,)? }
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum TokenType {
            // Special
            Illegal,
            Eof,
            Eol,

            // Identifiers & literals. The four identifier "sigils" spec.md
            // §4.2 calls out (local, constant, global, instance-var,
            // class-var) are distinguished by the lexer and carried on the
            // token; all four produce an Identifier AST node (I6).
            Ident,
            ConstantIdent,
            GlobalIdent,
            InstanceVarIdent,
            ClassVarIdent,
            Int,
            Float,
            String,
            UnterminatedString,

            $($sym_name,)*
            $($kw_name,)*
        }

        impl TokenType {
            pub fn lookup_ident(ident: &str) -> TokenType {
                match ident {
                    $($kw_str => TokenType::$kw_name,)*
                    _ => TokenType::Ident,
                }
            }
        }

        impl fmt::Display for TokenType {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let s = match self {
                    TokenType::Illegal => "ILLEGAL",
                    TokenType::Eof => "EOF",
                    TokenType::Eol => "EOL",
                    TokenType::Ident => "IDENT",
                    TokenType::ConstantIdent => "CONST_IDENT",
                    TokenType::GlobalIdent => "GLOBAL_IDENT",
                    TokenType::InstanceVarIdent => "IVAR_IDENT",
                    TokenType::ClassVarIdent => "CVAR_IDENT",
                    TokenType::Int => "INT",
                    TokenType::Float => "FLOAT",
                    TokenType::String => "STRING",
                    TokenType::UnterminatedString => "UNTERMINATED_STRING",
                    $(TokenType::$sym_name => $sym_str,)*
                    $(TokenType::$kw_name => $kw_str,)*
                };
                write!(f, "{s}")
            }
        }
    };
}

// ════════════════════════════════════════════════════════════════════════
//  TOKEN DEFINITIONS
// ════════════════════════════════════════════════════════════════════════

define_tokens! {
    symbols {
        Plus     => "+",
        Minus    => "-",
        Asterisk => "*",
        Slash    => "/",
        Eq       => "==",
        NotEq    => "!=",
        Lt       => "<",
        Gt       => ">",
        Lte      => "<=",
        Gte      => ">=",
        Assign   => "=",
        Question => "?",
        TernaryColon => ":",
        Dot      => ".",
        Comma    => ",",
        LParen   => "(",
        RParen   => ")",
    }

    keywords {
        Def  => "def",
        EndKeyword => "end",
        True => "true",
        False => "false",
        Nil  => "nil",
        If   => "if",
        Then => "then",
        Else => "else",
    }
}
