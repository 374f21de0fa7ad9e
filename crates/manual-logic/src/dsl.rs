// crates/manual-logic/src/dsl.rs
// ============================================================================
// Module: Requirement Text Parser
// Description: Parser for the textual requirement form emitted by rendering.
// Purpose: Turn `|Item| AND ({canReachRegion(Cave)} OR |@Key:2|)` back into
//          a `Logic` tree with size and nesting limits.
// Dependencies: crate::logic, thiserror
// ============================================================================

//! ## Overview
//! The parser accepts exactly the language produced by `Display` for
//! [`Logic`], plus a few conveniences: keywords are case-insensitive, extra
//! whitespace is ignored, and `AND` binds tighter than `OR` so unparenthesized
//! mixed chains read the usual way.
//!
//! ### Grammar (informal)
//! - **Items**: `|Sword|`, `|Sword:3|`, `|Sword:ALL|`, `|Sword:HALF|`, `|Sword:25%|`
//! - **Categories**: the same forms with an `@` prefix, `|@Weapons:2|`
//! - **Builtins**: `{canReachRegion(Cave)}`, `{ItemValue(Gold:30)}`,
//!   `{OptOne(|Lamp|)}`, `{YamlCompare(difficulty >= 2)}`
//! - **Custom functions**: any other `{Name(args)}`; arguments are kept verbatim
//! - **Operators**: `AND`, `OR`, and `( ... )` for grouping
//!
//! Chains are built left-deep without simplification, so rendering a parsed
//! tree reproduces the text it came from.
//!
//! ### Example
//!
//! ```
//! use manual_logic::parse_logic;
//!
//! let logic = parse_logic("|Sword| AND (|Lamp| OR |@Light|)").unwrap();
//! assert_eq!(logic.to_string(), "(|Lamp| OR |@Light|) AND |Sword|");
//! ```

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::logic::Builtin;
use crate::logic::Comparator;
use crate::logic::Logic;
use crate::logic::PERCENT_ALL;
use crate::logic::PERCENT_HALF;
use crate::logic::clamp_percent;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum allowed input size in bytes.
pub const MAX_INPUT_BYTES: usize = 1024 * 1024;
/// Maximum supported nesting depth of groups and `Opt` builtins.
pub const MAX_NESTING: usize = 32;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors that can occur while parsing requirement text.
///
/// # Invariants
/// - Every `position` is a byte offset into the original input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input was empty or contained only whitespace.
    #[error("input is empty")]
    EmptyInput,
    /// Input exceeded the size limit.
    #[error("input exceeds size limit: {actual_bytes} bytes (max {max_bytes})")]
    InputTooLarge {
        /// Maximum allowed bytes.
        max_bytes: usize,
        /// Actual input length in bytes.
        actual_bytes: usize,
    },
    /// Input exceeded the nesting limit.
    #[error("input nesting exceeds limit: depth {actual_depth} (max {max_depth}) at {position}")]
    NestingTooDeep {
        /// Maximum allowed nesting depth.
        max_depth: usize,
        /// Depth reached when the error occurred.
        actual_depth: usize,
        /// Byte offset in the original input.
        position: usize,
    },
    /// Unexpected character or missing piece.
    #[error("unexpected token `{found}` at {position}, expected {expected}")]
    UnexpectedToken {
        /// Human-friendly expectation summary.
        expected: &'static str,
        /// What was actually seen.
        found: String,
        /// Byte offset in the original input.
        position: usize,
    },
    /// A `|...|` or `{...}` clause was never closed.
    #[error("unterminated clause starting at {position}")]
    UnterminatedClause {
        /// Byte offset of the opening delimiter.
        position: usize,
    },
    /// A count, percentage, or compared value failed to parse.
    #[error("invalid number `{raw}` at {position}")]
    InvalidNumber {
        /// The raw numeric text.
        raw: String,
        /// Byte offset in the original input.
        position: usize,
    },
    /// `YamlCompare` used an unknown comparison symbol.
    #[error("unknown comparator `{symbol}` at {position}")]
    UnknownComparator {
        /// The unrecognized symbol.
        symbol: String,
        /// Byte offset in the original input.
        position: usize,
    },
    /// Input continued after a complete requirement.
    #[error("unexpected trailing input at {position}")]
    TrailingInput {
        /// Byte offset where unexpected input begins.
        position: usize,
    },
}

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Parses requirement text into a [`Logic`] tree.
///
/// # Errors
/// Returns [`ParseError`] for oversized or empty input, malformed clauses,
/// invalid numbers, excessive nesting, or trailing input.
pub fn parse_logic(input: &str) -> Result<Logic, ParseError> {
    if input.len() > MAX_INPUT_BYTES {
        return Err(ParseError::InputTooLarge {
            max_bytes: MAX_INPUT_BYTES,
            actual_bytes: input.len(),
        });
    }
    if input.trim().is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let mut parser = Parser::new(input);
    let logic = parser.parse_or()?;
    parser.expect_eof()?;
    Ok(logic)
}

impl std::str::FromStr for Logic {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_logic(s)
    }
}

// ============================================================================
// SECTION: Parser
// ============================================================================

/// Count or percentage suffix of a pipe clause.
enum Amount {
    /// `:N`
    Count(u32),
    /// `:ALL`, `:HALF`, or `:N%`
    Percent(u8),
}

/// Recursive-descent parser over the raw input bytes.
struct Parser<'a> {
    /// Source input.
    input: &'a str,
    /// Current byte offset into the input.
    offset: usize,
    /// Current nesting depth of groups and `Opt` builtins.
    nesting: usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser at the start of `input`.
    const fn new(input: &'a str) -> Self {
        Self {
            input,
            offset: 0,
            nesting: 0,
        }
    }

    /// Parses an OR chain of AND chains.
    fn parse_or(&mut self) -> Result<Logic, ParseError> {
        let mut logic = self.parse_and()?;
        while self.keyword("or") {
            let right = self.parse_and()?;
            logic = Logic::Or(Box::new(logic), Box::new(right));
        }
        Ok(logic)
    }

    /// Parses an AND chain of primaries.
    fn parse_and(&mut self) -> Result<Logic, ParseError> {
        let mut logic = self.parse_primary()?;
        while self.keyword("and") {
            let right = self.parse_primary()?;
            logic = Logic::And(Box::new(logic), Box::new(right));
        }
        Ok(logic)
    }

    /// Parses a group or a single clause.
    fn parse_primary(&mut self) -> Result<Logic, ParseError> {
        self.skip_whitespace();
        let position = self.offset;
        match self.peek() {
            Some(b'(') => {
                self.offset += 1;
                self.with_nesting(position, |parser| {
                    let inner = parser.parse_or()?;
                    parser.expect(b')', "`)`")?;
                    Ok(inner)
                })
            }
            Some(b'|') => self.parse_pipe(),
            Some(b'{') => self.parse_function(),
            _ => Err(ParseError::UnexpectedToken {
                expected: "`|`, `{`, or `(`",
                found: self.describe_current(),
                position,
            }),
        }
    }

    /// Parses an item or category clause.
    fn parse_pipe(&mut self) -> Result<Logic, ParseError> {
        let start = self.offset;
        let input = self.input;
        let body_start = start + 1;
        let Some(length) = input[body_start ..].find('|') else {
            return Err(ParseError::UnterminatedClause {
                position: start,
            });
        };
        let body = &input[body_start .. body_start + length];
        self.offset = body_start + length + 1;

        let (category, body) = match body.strip_prefix('@') {
            Some(rest) => (true, rest),
            None => (false, body),
        };
        let (name, amount) = match body.rsplit_once(':') {
            Some((name, raw)) => (name, Some(parse_amount(raw, body_start)?)),
            None => (body, None),
        };
        if name.is_empty() {
            return Err(ParseError::UnexpectedToken {
                expected: "item or category name",
                found: format!("|{body}|"),
                position: start,
            });
        }

        let name = name.to_string();
        Ok(match (category, amount) {
            (false, None) => Logic::Item(name),
            (false, Some(Amount::Count(count))) => Logic::ItemCount(name, count),
            (false, Some(Amount::Percent(percent))) => Logic::ItemPercent(name, percent),
            (true, None) => Logic::Category(name),
            (true, Some(Amount::Count(count))) => Logic::CategoryCount(name, count),
            (true, Some(Amount::Percent(percent))) => Logic::CategoryPercent(name, percent),
        })
    }

    /// Parses a `{Name(...)}` clause.
    fn parse_function(&mut self) -> Result<Logic, ParseError> {
        let start = self.offset;
        let input = self.input;
        let name_start = start + 1;
        let Some(length) = input[name_start ..].find('(') else {
            return Err(ParseError::UnterminatedClause {
                position: start,
            });
        };
        let name = &input[name_start .. name_start + length];
        if name.is_empty() || name.contains(['{', '}', '|', ')', ' ']) {
            return Err(ParseError::UnexpectedToken {
                expected: "function name",
                found: name.to_string(),
                position: name_start,
            });
        }
        self.offset = name_start + length + 1;

        let builtin = Builtin::from_name(name);
        if matches!(builtin, Builtin::OptOne | Builtin::OptAll) {
            let inner = self.with_nesting(start, Self::parse_or)?;
            self.expect(b')', "`)`")?;
            self.expect(b'}', "`}`")?;
            return Ok(if builtin == Builtin::OptOne {
                Logic::opt_one(inner)
            } else {
                Logic::opt_all(inner)
            });
        }

        let args_start = self.offset;
        let args = self.take_args(start)?;
        match builtin {
            Builtin::CanReachRegion => Ok(Logic::region(args)),
            Builtin::CanReachLocation => Ok(Logic::location(args)),
            Builtin::YamlEnabled => Ok(Logic::yaml_enabled(args)),
            Builtin::YamlDisabled => Ok(Logic::yaml_disabled(args)),
            Builtin::ItemValue => {
                let Some((phantom, raw)) = args.rsplit_once(':') else {
                    return Err(ParseError::UnexpectedToken {
                        expected: "`name:count`",
                        found: args.to_string(),
                        position: args_start,
                    });
                };
                let count = raw.parse().map_err(|_| ParseError::InvalidNumber {
                    raw: raw.to_string(),
                    position: args_start,
                })?;
                Ok(Logic::ItemValue(phantom.to_string(), count))
            }
            Builtin::YamlCompare => parse_compare(args, args_start),
            Builtin::Custom | Builtin::OptOne | Builtin::OptAll => Ok(Logic::custom(name, args)),
        }
    }

    /// Consumes balanced arguments up to the closing `)}` and returns them.
    fn take_args(&mut self, clause_start: usize) -> Result<&'a str, ParseError> {
        let input = self.input;
        let args_start = self.offset;
        let mut depth = 0_usize;
        for (index, byte) in input.as_bytes()[args_start ..].iter().enumerate() {
            match byte {
                b'(' => depth += 1,
                b')' if depth == 0 => {
                    self.offset = args_start + index + 1;
                    self.expect(b'}', "`}`")?;
                    return Ok(&input[args_start .. args_start + index]);
                }
                b')' => depth -= 1,
                _ => {}
            }
        }
        Err(ParseError::UnterminatedClause {
            position: clause_start,
        })
    }

    /// Consumes a case-insensitive keyword followed by a word boundary.
    fn keyword(&mut self, word: &str) -> bool {
        let saved = self.offset;
        self.skip_whitespace();
        let rest = &self.input.as_bytes()[self.offset ..];
        let matched = rest.len() >= word.len()
            && rest[.. word.len()].eq_ignore_ascii_case(word.as_bytes())
            && rest.get(word.len()).is_none_or(|next| !next.is_ascii_alphanumeric() && *next != b'_');
        if matched {
            self.offset += word.len();
        } else {
            self.offset = saved;
        }
        matched
    }

    /// Runs a parser step while enforcing the nesting limit.
    fn with_nesting<T>(
        &mut self,
        position: usize,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        let next_depth = self.nesting + 1;
        if next_depth > MAX_NESTING {
            return Err(ParseError::NestingTooDeep {
                max_depth: MAX_NESTING,
                actual_depth: next_depth,
                position,
            });
        }
        self.nesting = next_depth;
        let result = f(self);
        self.nesting = self.nesting.saturating_sub(1);
        result
    }

    /// Consumes the expected byte after optional whitespace.
    fn expect(&mut self, byte: u8, expected: &'static str) -> Result<(), ParseError> {
        self.skip_whitespace();
        if self.peek() == Some(byte) {
            self.offset += 1;
            Ok(())
        } else {
            Err(ParseError::UnexpectedToken {
                expected,
                found: self.describe_current(),
                position: self.offset,
            })
        }
    }

    /// Ensures only whitespace remains.
    fn expect_eof(&mut self) -> Result<(), ParseError> {
        self.skip_whitespace();
        if self.offset < self.input.len() {
            Err(ParseError::TrailingInput {
                position: self.offset,
            })
        } else {
            Ok(())
        }
    }

    /// Advances past ASCII whitespace.
    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|byte| byte.is_ascii_whitespace()) {
            self.offset += 1;
        }
    }

    /// Returns the current byte without advancing.
    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.offset).copied()
    }

    /// Formats the current character for diagnostics.
    fn describe_current(&self) -> String {
        self.input[self.offset ..]
            .chars()
            .next()
            .map_or_else(|| "end of input".to_string(), |ch| ch.to_string())
    }
}

// ============================================================================
// SECTION: Clause Bodies
// ============================================================================

/// Parses the text after the last `:` of a pipe clause.
///
/// Percentages above 100 clamp to `ALL`; `0%` is rejected.
fn parse_amount(raw: &str, position: usize) -> Result<Amount, ParseError> {
    let invalid = || ParseError::InvalidNumber {
        raw: raw.to_string(),
        position,
    };
    match raw {
        "ALL" => Ok(Amount::Percent(PERCENT_ALL)),
        "HALF" => Ok(Amount::Percent(PERCENT_HALF)),
        _ => match raw.strip_suffix('%') {
            Some(percent) => percent
                .parse()
                .ok()
                .and_then(clamp_percent)
                .map(Amount::Percent)
                .ok_or_else(invalid),
            None => raw.parse().map(Amount::Count).map_err(|_| invalid()),
        },
    }
}

/// Parses `setting symbol value`, splitting from the right.
fn parse_compare(args: &str, position: usize) -> Result<Logic, ParseError> {
    let malformed = || ParseError::UnexpectedToken {
        expected: "`setting symbol value`",
        found: args.to_string(),
        position,
    };
    let (rest, raw) = args.rsplit_once(' ').ok_or_else(malformed)?;
    let (setting, symbol) = rest.rsplit_once(' ').ok_or_else(malformed)?;
    if setting.is_empty() {
        return Err(malformed());
    }
    let comparator = Comparator::from_symbol(symbol).ok_or_else(|| ParseError::UnknownComparator {
        symbol: symbol.to_string(),
        position,
    })?;
    let value = raw.parse().map_err(|_| ParseError::InvalidNumber {
        raw: raw.to_string(),
        position,
    })?;
    Ok(Logic::yaml_compare(setting, comparator, value))
}
