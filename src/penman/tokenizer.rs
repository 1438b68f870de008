#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PenmanToken {
    LeftParen,  // (
    RightParen, // )
    Slash,      // /

    Role(String),   // :ARG0, :op1, :
    Symbol(String), // s1c, cat, -, 12
    String(String), // "Prague", quotes included

    Alignment(String), // ~e.1,2

    Unexpected(char),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedToken {
    pub token: PenmanToken,
    /// Char offset in the source text.
    pub position: usize,
}

fn is_symbol_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '(' | ')' | '/' | ':' | '~' | ',')
}

// Lexer for the PENMAN graph notation
//
// Comments ('#' up to the end of the line) and whitespace are skipped.
pub fn tokenize_penman(txt: &str) -> Vec<PositionedToken> {
    let mut tokens = Vec::new();

    let all_chars: Vec<char> = txt.chars().collect();
    let mut chars: &[char] = &all_chars;

    while !chars.is_empty() {
        let position = all_chars.len() - chars.len();

        let (len, token) = match chars[0] {
            c if c.is_whitespace() => (1, None),

            '#' => {
                let len = chars.iter().position(|&c| c == '\n').unwrap_or(chars.len());
                (len, None)
            }

            '(' => (1, Some(PenmanToken::LeftParen)),
            ')' => (1, Some(PenmanToken::RightParen)),
            '/' => (1, Some(PenmanToken::Slash)),

            ':' => {
                let len = 1 + take_while(&chars[1..], is_symbol_char);
                (len, Some(PenmanToken::Role(collect(&chars[..len]))))
            }

            '"' => match string_len(chars) {
                Some(len) => (len, Some(PenmanToken::String(collect(&chars[..len])))),
                // an unterminated quote is just part of a symbol
                None => {
                    let len = take_while(chars, is_symbol_char);
                    (len, Some(PenmanToken::Symbol(collect(&chars[..len]))))
                }
            },

            '~' => match alignment_len(chars) {
                Some(len) => (len, Some(PenmanToken::Alignment(collect(&chars[..len])))),
                None => (1, Some(PenmanToken::Unexpected('~'))),
            },

            ',' => (1, Some(PenmanToken::Unexpected(','))),

            _ => {
                let len = take_while(chars, is_symbol_char);
                (len, Some(PenmanToken::Symbol(collect(&chars[..len]))))
            }
        };

        if let Some(token) = token {
            tokens.push(PositionedToken { token, position });
        }
        chars = &chars[len..];
    }

    tokens
}

fn take_while(chars: &[char], predicate: impl Fn(char) -> bool) -> usize {
    chars.iter().take_while(|&&c| predicate(c)).count()
}

fn collect(chars: &[char]) -> String {
    chars.iter().collect()
}

// "..." with backslash escapes
fn string_len(chars: &[char]) -> Option<usize> {
    let mut i = 1;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 2,
            '"' => return Some(i + 1),
            _ => i += 1,
        }
    }
    None
}

// ~ [a-z] [.] digits (, digits)*
fn alignment_len(chars: &[char]) -> Option<usize> {
    let mut i = 1;

    if chars.get(i).map_or(false, |c| c.is_ascii_lowercase()) {
        i += 1;
        if chars.get(i) == Some(&'.') {
            i += 1;
        }
    }

    let digits = take_while(&chars[i.min(chars.len())..], |c| c.is_ascii_digit());
    if digits == 0 {
        return None;
    }
    i += digits;

    while chars.get(i) == Some(&',') {
        let digits = take_while(&chars[(i + 1).min(chars.len())..], |c| c.is_ascii_digit());
        if digits == 0 {
            break;
        }
        i += 1 + digits;
    }

    Some(i)
}
