use lachs::Span;

#[lachs::token]
pub enum Token {
    #[terminal(":=")]
    Assign,
    #[terminal("+")]
    Plus,
    #[terminal("*")]
    Star,
    #[terminal("/")]
    Slash,
    #[terminal("%")]
    Percent,
    #[terminal("^")]
    Caret,
    #[terminal("$")]
    Dollar,
    #[terminal("~")]
    Tilde,
    #[terminal("?")]
    Question,
    #[literal("[a-zA-Z]+")]
    Name,
    #[literal("-?[0-9]+")]
    Integer,
    #[literal(r#""([^"\\]|\\.)*""#)]
    StringLiteral,
}

impl Token {
    pub fn pos(&self) -> Span {
        match self {
            Token::Assign(inner) => inner.position.clone(),
            Token::Plus(inner) => inner.position.clone(),
            Token::Star(inner) => inner.position.clone(),
            Token::Slash(inner) => inner.position.clone(),
            Token::Percent(inner) => inner.position.clone(),
            Token::Caret(inner) => inner.position.clone(),
            Token::Dollar(inner) => inner.position.clone(),
            Token::Tilde(inner) => inner.position.clone(),
            Token::Question(inner) => inner.position.clone(),
            Token::Name(inner) => inner.position.clone(),
            Token::Integer(inner) => inner.position.clone(),
            Token::StringLiteral(inner) => inner.position.clone(),
        }
    }

    /// Returns a human-readable description of the token
    pub fn describe(&self) -> String {
        match self {
            Token::Assign(_) => "':='".to_string(),
            Token::Plus(_) => "'+'".to_string(),
            Token::Star(_) => "'*'".to_string(),
            Token::Slash(_) => "'/'".to_string(),
            Token::Percent(_) => "'%'".to_string(),
            Token::Caret(_) => "'^'".to_string(),
            Token::Dollar(_) => "'$'".to_string(),
            Token::Tilde(_) => "'~'".to_string(),
            Token::Question(_) => "'?'".to_string(),
            Token::Name(inner) => format!("name '{}'", inner.value),
            Token::Integer(inner) => format!("integer '{}'", inner.value),
            Token::StringLiteral(inner) => format!("string {}", inner.value),
        }
    }
}
