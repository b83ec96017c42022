//! Tokenizing parser for normalized GS1 element strings.
//!
//! A single left-to-right scan: resolve an AI by greedy dictionary match,
//! slice off its value (fixed width, or up to the next GS separator), then
//! run character-set enforcement and semantic validation on the element.
//! Errors are fatal to the scan; warnings never stop it. Elements already
//! decoded are always returned, even when the scan stops early.

mod semantic;

use serde::{Deserialize, Serialize};

use gs1_toolchain_diagnostics::{Diagnostic, Span, codes};

use crate::GS;
use crate::dictionary::{self, AiDefinition, AiMatch};

// ── Value types ─────────────────────────────────────────────────────────

/// One decoded (AI, value) pair, before any validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gs1Element {
    /// Application Identifier code, 2 to 4 digits.
    pub ai: String,
    /// The raw decoded value.
    pub value: String,
}

impl Gs1Element {
    /// Create an element from an AI code and value.
    pub fn new(ai: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            ai: ai.into(),
            value: value.into(),
        }
    }
}

/// A decoded element together with its dictionary definition, source span,
/// and accumulated validation outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedElement {
    /// The decoded (AI, value) pair.
    pub element: Gs1Element,
    /// The matched dictionary definition. `None` is modeled for forward
    /// compatibility; dictionary-bound parsing always fills it in.
    pub definition: Option<AiDefinition>,
    /// Half-open byte span of the value in the normalized input.
    pub span: Span,
    /// Validation notes, in emission order. Severities `Warn` and `Info`.
    pub warnings: Vec<Diagnostic>,
    /// False once any invalidating rule fired. Never flips back to true.
    pub valid: bool,
}

impl ParsedElement {
    fn new(element: Gs1Element, definition: Option<AiDefinition>, span: Span) -> Self {
        Self {
            element,
            definition,
            span,
            warnings: Vec::new(),
            valid: true,
        }
    }

    pub(crate) fn add_warning(&mut self, diagnostic: Diagnostic) {
        self.warnings.push(diagnostic);
    }

    pub(crate) fn mark_invalid(&mut self) {
        self.valid = false;
    }
}

/// Result of parsing one normalized scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ParseResult {
    /// Decoded elements in input order.
    pub elements: Vec<ParsedElement>,
    /// Fatal problems; non-empty means the scan stopped early.
    pub errors: Vec<Diagnostic>,
    /// Non-fatal result-level notes.
    pub warnings: Vec<Diagnostic>,
    /// Whether the missing-separator repair fired during this parse.
    pub heuristics_applied: bool,
}

impl ParseResult {
    /// A parse succeeds when it produced no errors. Individual elements may
    /// still be invalid.
    pub fn success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Configuration for [`parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ParseOptions {
    /// Accept lowercase letters in GS1-alphanumeric values.
    pub allow_lowercase: bool,
    /// Attempt the (10)/(21) missing-separator repair.
    pub heuristic_repair: bool,
}

// ── Parser ──────────────────────────────────────────────────────────────

/// Parse a normalized GS1 element string.
///
/// Expects the output of [`crate::normalize`]; raw scanner text with
/// placeholders or framing noise will usually stop at the first
/// [`codes::UNEXPECTED_CHAR`]. Empty input yields an empty, successful
/// result.
pub fn parse(normalized: &str, options: &ParseOptions) -> ParseResult {
    Scanner::new(normalized, options).run()
}

struct Scanner<'a> {
    input: &'a str,
    options: &'a ParseOptions,
    index: usize,
    result: ParseResult,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str, options: &'a ParseOptions) -> Self {
        Self {
            input,
            options,
            index: 0,
            result: ParseResult::default(),
        }
    }

    fn run(mut self) -> ParseResult {
        while self.index < self.input.len() {
            let Some(current) = self.input[self.index..].chars().next() else {
                break;
            };
            if current == GS {
                self.index += 1;
                continue;
            }
            if !current.is_ascii_digit() {
                self.error(
                    codes::UNEXPECTED_CHAR,
                    format!("Unexpected character '{}'", printable(current)),
                    Span::new(self.index, self.index + current.len_utf8()),
                );
                break;
            }
            let Some(matched) = dictionary::match_at(self.input, self.index) else {
                self.error(
                    codes::UNKNOWN_AI,
                    format!("Unknown AI at position {}", self.index),
                    Span::at(self.index),
                );
                break;
            };
            let done = if matched.definition.fixed_length {
                self.take_fixed(&matched)
            } else {
                self.take_variable(&matched)
            };
            if done {
                break;
            }
        }
        self.result
    }

    /// Fixed-width value: exactly `max_length` characters follow the AI.
    /// Returns true when the scan must stop.
    fn take_fixed(&mut self, matched: &AiMatch<'static>) -> bool {
        let value_start = self.index + matched.len;
        let Some(value_end) = advance_chars(self.input, value_start, matched.definition.max_length)
        else {
            self.error(
                codes::VALUE_TOO_SHORT,
                format!("Value for AI ({}) is shorter than expected", matched.code),
                Span::new(value_start, self.input.len()),
            );
            return true;
        };
        let value = &self.input[value_start..value_end];
        let mut element = ParsedElement::new(
            Gs1Element::new(matched.code, value),
            Some(matched.definition.clone()),
            Span::new(value_start, value_end),
        );
        enforce_character_set(&mut element, matched.definition, self.options);
        semantic::apply(&mut element);
        self.result.elements.push(element);
        self.index = value_end;
        false
    }

    /// Variable-width value: everything up to the next GS or end of input,
    /// minus whatever the missing-separator repair claims back.
    /// Returns true when the scan must stop.
    fn take_variable(&mut self, matched: &AiMatch<'static>) -> bool {
        let value_start = self.index + matched.len;
        let cursor = self.input[value_start..]
            .find(GS)
            .map_or(self.input.len(), |offset| value_start + offset);
        let terminated_by_gs = cursor < self.input.len();
        let mut value = &self.input[value_start..cursor];

        // A value closed by an actual GS did not lose its separator, so the
        // embedded-AI check only applies when the value ran to end of input.
        let mut repaired = false;
        if let Some((offset, embedded)) = (!terminated_by_gs)
            .then(|| detect_embedded_ai(value))
            .flatten()
        {
            if self.options.heuristic_repair && matched.code == "10" && embedded.code == "21" {
                repaired = self.try_split_batch_serial(matched, value, value_start, offset, &embedded);
                if repaired {
                    value = &value[..offset];
                }
            }
            if !repaired {
                self.error(
                    codes::MISSING_SEPARATOR,
                    format!(
                        "Expected GS after variable-length AI ({}) before AI ({})",
                        matched.code, embedded.code
                    ),
                    Span::at(value_start + offset),
                );
                return true;
            }
        }

        if value.is_empty() {
            self.error(
                codes::EMPTY_VALUE,
                format!("Value for AI ({}) cannot be empty", matched.code),
                Span::at(value_start),
            );
            return true;
        }

        let value_end = value_start + value.len();
        let mut element = ParsedElement::new(
            Gs1Element::new(matched.code, value),
            Some(matched.definition.clone()),
            Span::new(value_start, value_end),
        );
        let char_count = value.chars().count();
        if char_count < matched.definition.min_length {
            element.add_warning(Diagnostic::warn(
                codes::BELOW_MIN_LENGTH,
                format!(
                    "Value shorter than minimum length {}",
                    matched.definition.min_length
                ),
                None,
            ));
            element.mark_invalid();
        }
        if char_count > matched.definition.max_length {
            element.add_warning(Diagnostic::warn(
                codes::ABOVE_MAX_LENGTH,
                format!(
                    "Value longer than maximum length {}",
                    matched.definition.max_length
                ),
                None,
            ));
        }
        enforce_character_set(&mut element, matched.definition, self.options);
        semantic::apply(&mut element);
        self.result.elements.push(element);

        if !repaired {
            self.index = cursor;
            if self.input[self.index..].starts_with(GS) {
                self.index += 1;
            }
        }
        false
    }

    /// The one sanctioned repair: a (10) value with a (21) element fused on.
    /// Accepts only when the candidate batch respects (10)'s bounds and the
    /// candidate serial looks plausible. On success the main cursor is moved
    /// to the embedded AI so the serial parses through the normal path; no
    /// separator is consumed. Returns whether the split was applied.
    fn try_split_batch_serial(
        &mut self,
        matched: &AiMatch<'static>,
        value: &str,
        value_start: usize,
        offset: usize,
        embedded: &AiMatch<'static>,
    ) -> bool {
        let batch = &value[..offset];
        let serial = &value[offset + embedded.len..];
        let serial_len = serial.chars().count();
        let plausible = !batch.is_empty()
            && batch.chars().count() <= matched.definition.max_length
            && (1..=20).contains(&serial_len)
            && serial.chars().next().is_some_and(char::is_alphanumeric);
        if !plausible {
            return false;
        }
        self.index = value_start + offset;
        self.result.heuristics_applied = true;
        self.result.warnings.push(Diagnostic::warn(
            codes::HEURISTIC_SPLIT,
            "Applied heuristic split between (10) and (21)",
            Some(Span::at(self.index)),
        ));
        true
    }

    fn error(&mut self, code: &'static str, message: String, span: Span) {
        self.result.errors.push(Diagnostic::error(code, message, Some(span)));
    }
}

// ── Scan helpers ────────────────────────────────────────────────────────

/// Byte offset after advancing `count` characters from `start`, or `None`
/// when the input ends first.
fn advance_chars(text: &str, start: usize, count: usize) -> Option<usize> {
    let mut end = start;
    let mut chars = text.get(start..)?.chars();
    for _ in 0..count {
        end += chars.next()?.len_utf8();
    }
    Some(end)
}

/// Look for a recognized AI starting inside `value` (offset 1 onward; offset
/// 0 is the value's own start). Models scanners that drop the separator
/// after a variable-length value.
fn detect_embedded_ai(value: &str) -> Option<(usize, AiMatch<'static>)> {
    for (offset, c) in value.char_indices().skip(1) {
        if !c.is_ascii_digit() {
            continue;
        }
        if let Some(matched) = dictionary::match_at(value, offset) {
            return Some((offset, matched));
        }
    }
    None
}

/// Per-character enforcement of the AI's declared character set, plus the
/// advisory lowercase note when the policy is off.
fn enforce_character_set(
    element: &mut ParsedElement,
    definition: &AiDefinition,
    options: &ParseOptions,
) {
    let value = element.element.value.clone();
    let value_start = element.span.start;
    for (offset, c) in value.char_indices() {
        if !definition.character_set.is_allowed(c, options.allow_lowercase) {
            element.add_warning(Diagnostic::warn(
                codes::CHAR_NOT_ALLOWED,
                format!(
                    "Character '{}' not allowed for AI ({})",
                    printable(c),
                    element.element.ai
                ),
                Some(Span::new(
                    value_start + offset,
                    value_start + offset + c.len_utf8(),
                )),
            ));
            element.mark_invalid();
        }
    }
    if !options.allow_lowercase && value.chars().any(char::is_lowercase) {
        element.add_warning(Diagnostic::warn(
            codes::LOWERCASE_PRESENT,
            "Lowercase characters detected",
            None,
        ));
    }
}

/// Control characters rendered as hex so diagnostics stay printable.
fn printable(c: char) -> String {
    if c.is_control() {
        format!("0x{:02X}", c as u32)
    } else {
        c.to_string()
    }
}
