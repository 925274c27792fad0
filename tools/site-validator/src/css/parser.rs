// SPDX-License-Identifier: PMPL-1.0-or-later
//! Minimal stylesheet parser.
//!
//! Produces top-level style rules. At-rules are checked for balanced
//! structure and then skipped, so rules nested in `@media` and similar blocks
//! are not style rules. Comments are removed before parsing; strings, parentheses and
//! nested blocks are respected when splitting selectors and declarations.
//! Unterminated comments or strings and unbalanced braces are errors.

use thiserror::Error;

/// A structural error in a stylesheet
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct CssParseError {
    pub line: usize,
    pub message: String,
}

impl CssParseError {
    fn new(line: usize, message: &str) -> Self {
        Self {
            line,
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Stylesheet {
    /// Top-level style rules, in source order
    pub rules: Vec<StyleRule>,
}

#[derive(Debug, Clone)]
pub struct StyleRule {
    pub selector: String,
    pub declarations: Vec<Declaration>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Lower-cased property name
    pub name: String,
    /// Value with any `!important` removed
    pub value: String,
}

/// Parse a stylesheet
pub fn parse_stylesheet(source: &str) -> Result<Stylesheet, CssParseError> {
    let cleaned = strip_comments(source)?;
    let mut parser = Parser {
        chars: cleaned.chars().collect(),
        pos: 0,
    };
    Ok(Stylesheet {
        rules: parser.parse_rules()?,
    })
}

/// Replace comments with a space, keeping newlines so line numbers survive
fn strip_comments(source: &str) -> Result<String, CssParseError> {
    let chars: Vec<char> = source.chars().collect();
    let mut out = String::with_capacity(source.len());
    let mut line = 1;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '/' && chars.get(i + 1) == Some(&'*') {
            let start_line = line;
            i += 2;
            loop {
                match chars.get(i).copied() {
                    None => return Err(CssParseError::new(start_line, "unterminated comment")),
                    Some('*') if chars.get(i + 1) == Some(&'/') => {
                        i += 2;
                        break;
                    }
                    Some('\n') => {
                        out.push('\n');
                        line += 1;
                        i += 1;
                    }
                    Some(_) => i += 1,
                }
            }
            out.push(' ');
            continue;
        }

        if c == '"' || c == '\'' {
            let start_line = line;
            out.push(c);
            i += 1;
            loop {
                match chars.get(i).copied() {
                    None | Some('\n') => {
                        return Err(CssParseError::new(start_line, "unterminated string"))
                    }
                    Some('\\') => {
                        out.push('\\');
                        if let Some(&next) = chars.get(i + 1) {
                            out.push(next);
                            if next == '\n' {
                                line += 1;
                            }
                        }
                        i += 2;
                    }
                    Some(q) if q == c => {
                        out.push(q);
                        i += 1;
                        break;
                    }
                    Some(other) => {
                        out.push(other);
                        i += 1;
                    }
                }
            }
            continue;
        }

        if c == '\n' {
            line += 1;
        }
        out.push(c);
        i += 1;
    }

    Ok(out)
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn line_at(&self, pos: usize) -> usize {
        self.chars[..pos.min(self.chars.len())]
            .iter()
            .filter(|&&c| c == '\n')
            .count()
            + 1
    }

    fn error_at(&self, pos: usize, message: &str) -> CssParseError {
        CssParseError::new(self.line_at(pos), message)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn parse_rules(&mut self) -> Result<Vec<StyleRule>, CssParseError> {
        let mut rules = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return Ok(rules),
                Some('}') => return Err(self.error_at(self.pos, "unexpected '}'")),
                Some('@') => self.skip_at_rule()?,
                Some(_) => rules.push(self.parse_style_rule()?),
            }
        }
    }

    /// Consume a statement at-rule up to `;` or a block at-rule up to its
    /// closing brace
    fn skip_at_rule(&mut self) -> Result<(), CssParseError> {
        self.pos += 1;
        let (_, terminator) = self.read_until(&[';', '{'])?;
        if terminator == '{' {
            self.read_block()?;
        }
        Ok(())
    }

    fn parse_style_rule(&mut self) -> Result<StyleRule, CssParseError> {
        let start = self.pos;
        let (selector, terminator) = self.read_until(&['{', ';'])?;
        if terminator != '{' {
            return Err(self.error_at(start, "expected '{' after selector"));
        }
        let body = self.read_block()?;

        Ok(StyleRule {
            selector: selector.trim().to_string(),
            declarations: parse_declarations(&body),
        })
    }

    /// Read up to (and consume) the first stop character outside strings
    fn read_until(&mut self, stops: &[char]) -> Result<(String, char), CssParseError> {
        let start = self.pos;
        let mut text = String::new();

        while let Some(c) = self.peek() {
            if c == '"' || c == '\'' {
                self.take_string(&mut text);
                continue;
            }
            if stops.contains(&c) {
                self.pos += 1;
                return Ok((text, c));
            }
            if c == '}' {
                return Err(self.error_at(self.pos, "unexpected '}'"));
            }
            text.push(c);
            self.pos += 1;
        }

        Err(self.error_at(start, "unexpected end of stylesheet"))
    }

    /// Read a block body; the opening brace has already been consumed
    fn read_block(&mut self) -> Result<String, CssParseError> {
        let open = self.pos.saturating_sub(1);
        let mut depth = 1;
        let mut text = String::new();

        while let Some(c) = self.peek() {
            match c {
                '"' | '\'' => {
                    self.take_string(&mut text);
                    continue;
                }
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        self.pos += 1;
                        return Ok(text);
                    }
                }
                _ => {}
            }
            text.push(c);
            self.pos += 1;
        }

        Err(self.error_at(open, "unclosed block"))
    }

    fn take_string(&mut self, text: &mut String) {
        let quote = self.chars[self.pos];
        text.push(quote);
        self.pos += 1;

        while let Some(c) = self.peek() {
            text.push(c);
            self.pos += 1;
            if c == '\\' {
                if let Some(next) = self.peek() {
                    text.push(next);
                    self.pos += 1;
                }
            } else if c == quote {
                break;
            }
        }
    }
}

/// Split a declaration block on `;` outside strings, parentheses and nested blocks
fn parse_declarations(body: &str) -> Vec<Declaration> {
    let mut declarations = Vec::new();
    let mut current = String::new();
    let mut paren_depth = 0usize;
    let mut brace_depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in body.chars() {
        if let Some(q) = quote {
            current.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }

        match c {
            '"' | '\'' => quote = Some(c),
            '(' => paren_depth += 1,
            ')' => paren_depth = paren_depth.saturating_sub(1),
            '{' => brace_depth += 1,
            '}' => {
                brace_depth = brace_depth.saturating_sub(1);
                if brace_depth == 0 {
                    // Nested rule: not a declaration of this rule
                    current.clear();
                    continue;
                }
            }
            ';' if paren_depth == 0 && brace_depth == 0 => {
                declarations.extend(parse_declaration(&current));
                current.clear();
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    declarations.extend(parse_declaration(&current));

    declarations
}

fn parse_declaration(text: &str) -> Option<Declaration> {
    let (name, value) = text.split_once(':')?;
    let name = name.trim().to_ascii_lowercase();
    if name.is_empty() {
        return None;
    }

    let value = value.trim();
    let lower = value.to_ascii_lowercase();
    let value = match lower.rfind('!') {
        Some(idx) if lower[idx + 1..].trim() == "important" => value[..idx].trim_end(),
        _ => value,
    };

    Some(Declaration {
        name,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_rules() {
        let sheet = parse_stylesheet("body { margin: 0; color: #333 }\n.hero{background:url(a.png)}").unwrap();
        let rules = &sheet.rules;
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].selector, "body");
        assert_eq!(rules[1].selector, ".hero");
        assert_eq!(rules[0].declarations.len(), 2);
        assert_eq!(rules[0].declarations[1].name, "color");
        assert_eq!(rules[0].declarations[1].value, "#333");
        assert_eq!(rules[1].declarations[0].value, "url(a.png)");
    }

    #[test]
    fn test_important_is_stripped() {
        let sheet = parse_stylesheet(".a { color: red !important; margin: 0 ! IMPORTANT }").unwrap();
        let decls = &sheet.rules[0].declarations;
        assert_eq!(decls[0].value, "red");
        assert_eq!(decls[1].value, "0");
    }

    #[test]
    fn test_semicolons_inside_urls_and_strings() {
        let css = r#".icon { background-image: url(data:image/png;base64,AAAA); content: "a;b" }"#;
        let sheet = parse_stylesheet(css).unwrap();
        let decls = &sheet.rules[0].declarations;
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[0].value, "url(data:image/png;base64,AAAA)");
        assert_eq!(decls[1].value, "\"a;b\"");
    }

    #[test]
    fn test_at_rules_are_not_style_rules() {
        let css = "@charset \"utf-8\";\n@import url(base.css);\n@media (max-width: 600px) { .a { color: red } }\n.b { color: blue }";
        let sheet = parse_stylesheet(css).unwrap();
        assert_eq!(sheet.rules.len(), 1);
        assert_eq!(sheet.rules[0].selector, ".b");
        assert_eq!(sheet.rules[0].declarations[0].value, "blue");
    }

    #[test]
    fn test_unclosed_at_rule_block() {
        let err = parse_stylesheet(".a { margin: 0 }
@media print { .b { color: red }").unwrap_err();
        assert_eq!(err.message, "unclosed block");
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_comments_removed() {
        let css = "/* header { } */\n.a { /* color: red; */ margin: 0 }";
        let sheet = parse_stylesheet(css).unwrap();
        let rules = &sheet.rules;
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].declarations.len(), 1);
        assert_eq!(rules[0].declarations[0].name, "margin");
    }

    #[test]
    fn test_unclosed_block() {
        let err = parse_stylesheet(".a { color: red;\n.b { margin: 0 }").unwrap_err();
        assert_eq!(err.message, "unclosed block");
        assert_eq!(err.line, 1);
    }

    #[test]
    fn test_stray_closing_brace() {
        let err = parse_stylesheet(".a { color: red }\n}\n").unwrap_err();
        assert_eq!(err.message, "unexpected '}'");
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_unterminated_comment_and_string() {
        let err = parse_stylesheet(".a { color: red }\n/* never closed").unwrap_err();
        assert_eq!(err.message, "unterminated comment");
        assert_eq!(err.line, 2);

        let err = parse_stylesheet(".a { content: \"open }").unwrap_err();
        assert_eq!(err.message, "unterminated string");
    }

    #[test]
    fn test_declaration_outside_rule() {
        let err = parse_stylesheet("color: red;").unwrap_err();
        assert_eq!(err.message, "expected '{' after selector");
    }
}
