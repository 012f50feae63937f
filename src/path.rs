//! Path data tokenizing, measuring and rewriting.
//!
//! Path strings are never parsed into curves. They are split into a flat
//! stream of [`Token`]s, and every numeric operand is treated as a coordinate
//! whose axis is decided by its position after the most recent command
//! letter: the first operand is an x, the second a y, and so on, starting
//! over at every command.
use std::{fmt::Write, sync::LazyLock};

use kurbo::Rect;
use regex::Regex;

use crate::{fit::GlyphFitPlan, frame::NormalizationFrame};

static TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)] // Safe because the regex is valid
    Regex::new(r"(?P<command>[a-zA-Z])|(?P<operand>[-+]?(?:\d*\.\d+|\d+))").unwrap()
});

/// One element of a tokenized path data string
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    /// A command letter, passed through unchanged
    Command(char),
    /// A numeric operand
    Operand(f64),
}

/// Which axis the next operand belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisRole {
    #[default]
    X,
    Y,
}

impl AxisRole {
    /// The role after `token` has been consumed.
    ///
    /// Commands always reset to [`AxisRole::X`]. A command that takes an odd
    /// number of operands (such as `H` or `V`) therefore leaves the following
    /// operands of that command on the wrong axis; this is kept as-is so
    /// output stays compatible with existing fonts built from the same icons.
    pub fn next(self, token: &Token) -> AxisRole {
        match (token, self) {
            (Token::Command(_), _) => AxisRole::X,
            (Token::Operand(_), AxisRole::X) => AxisRole::Y,
            (Token::Operand(_), AxisRole::Y) => AxisRole::X,
        }
    }
}

/// Walk `tokens` and pair every operand with the axis it is assigned to.
pub fn operand_roles(tokens: &[Token]) -> impl Iterator<Item = (AxisRole, f64)> + '_ {
    tokens
        .iter()
        .scan(AxisRole::default(), |role, token| {
            let current = *role;
            *role = role.next(token);
            Some(match token {
                Token::Operand(value) => Some((current, *value)),
                Token::Command(_) => None,
            })
        })
        .flatten()
}

/// Split path data into command and operand tokens.
///
/// Anything that is neither a letter nor a number (commas, whitespace, stray
/// dots) is dropped. No check is made that commands have the right number of
/// operands.
pub fn tokenize(data: &str) -> Vec<Token> {
    TOKEN_REGEX
        .captures_iter(data)
        .filter_map(|caps| {
            if let Some(command) = caps.name("command") {
                command.as_str().chars().next().map(Token::Command)
            } else {
                caps.name("operand")
                    .and_then(|m| m.as_str().parse::<f64>().ok())
                    .map(Token::Operand)
            }
        })
        .collect()
}

/// The extent of all operands, by axis.
///
/// Returns `None` unless at least one operand landed on each axis.
pub fn bounding_box(tokens: &[Token]) -> Option<Rect> {
    let mut x_range: Option<(f64, f64)> = None;
    let mut y_range: Option<(f64, f64)> = None;
    for (role, value) in operand_roles(tokens) {
        let range = match role {
            AxisRole::X => &mut x_range,
            AxisRole::Y => &mut y_range,
        };
        *range = Some(match *range {
            Some((lo, hi)) => (lo.min(value), hi.max(value)),
            None => (value, value),
        });
    }
    let ((min_x, max_x), (min_y, max_y)) = (x_range?, y_range?);
    Some(Rect::new(min_x, min_y, max_x, max_y))
}

/// Rewrite every operand through the shared frame and the glyph's fit plan,
/// flipping y so the glyph is upright in font space.
pub fn emit(tokens: &[Token], frame: &NormalizationFrame, plan: &GlyphFitPlan) -> String {
    let scale = frame.scale() * plan.scale_factor;
    let mut role = AxisRole::default();
    let mut out = String::new();
    for token in tokens {
        if !out.is_empty() {
            out.push(' ');
        }
        match token {
            Token::Command(c) => out.push(*c),
            Token::Operand(raw) => {
                let value = match role {
                    AxisRole::X => (raw - frame.origin.x) * scale + plan.shift_x,
                    AxisRole::Y => {
                        frame.canvas_size - (raw - frame.origin.y) * scale + plan.shift_y
                    }
                };
                // Writing to a String cannot fail
                let _ = write!(out, "{:.2}", value);
            }
        }
        role = role.next(token);
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use kurbo::Point;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn identity_frame() -> NormalizationFrame {
        NormalizationFrame {
            origin: Point::ZERO,
            square_size: 300.0,
            canvas_size: 300.0,
        }
    }

    #[test]
    fn test_tokenize_mixed_separators() {
        let tokens = tokenize("M10,20L-3.5 .25z");
        assert_eq!(
            tokens,
            vec![
                Token::Command('M'),
                Token::Operand(10.0),
                Token::Operand(20.0),
                Token::Command('L'),
                Token::Operand(-3.5),
                Token::Operand(0.25),
                Token::Command('z'),
            ]
        );
    }

    #[test]
    fn test_tokenize_adjacent_numbers() {
        // "1.5.5" is two numbers, "-2-3" is two signed numbers
        let tokens = tokenize("M1.5.5-2-3");
        assert_eq!(
            tokens,
            vec![
                Token::Command('M'),
                Token::Operand(1.5),
                Token::Operand(0.5),
                Token::Operand(-2.0),
                Token::Operand(-3.0),
            ]
        );
    }

    #[test]
    fn test_tokenize_round_trip() {
        let source = "M 0 0 L 100.5 -20 C 1 2 3 4 5 6 Z";
        let tokens = tokenize(source);
        let rejoined = tokens
            .iter()
            .map(|t| match t {
                Token::Command(c) => c.to_string(),
                Token::Operand(v) => v.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(tokenize(&rejoined), tokens);
    }

    #[test]
    fn test_axis_alternation_resets_on_command() {
        let tokens = tokenize("M 1 2 3 4 L 5 6");
        let roles: Vec<AxisRole> = operand_roles(&tokens).map(|(r, _)| r).collect();
        assert_eq!(
            roles,
            vec![
                AxisRole::X,
                AxisRole::Y,
                AxisRole::X,
                AxisRole::Y,
                AxisRole::X,
                AxisRole::Y
            ]
        );
    }

    #[test]
    fn test_odd_arity_command_desynchronizes_roles() {
        // H takes one operand, so the second H operand is read as a y
        let tokens = tokenize("M 0 0 H 10 20 L 1 2");
        let roles: Vec<(AxisRole, f64)> = operand_roles(&tokens).collect();
        assert_eq!(
            roles,
            vec![
                (AxisRole::X, 0.0),
                (AxisRole::Y, 0.0),
                (AxisRole::X, 10.0),
                (AxisRole::Y, 20.0),
                (AxisRole::X, 1.0),
                (AxisRole::Y, 2.0),
            ]
        );
    }

    #[test]
    fn test_bounding_box() {
        let bbox = bounding_box(&tokenize("M 10 -5 L 40 25 L -2 7 Z")).unwrap();
        assert_eq!(bbox, Rect::new(-2.0, -5.0, 40.0, 25.0));
    }

    #[rstest]
    #[case::empty("")]
    #[case::commands_only("M Z")]
    #[case::single_operand("M 5")]
    fn test_bounding_box_absent(#[case] data: &str) {
        assert!(bounding_box(&tokenize(data)).is_none());
    }

    #[test]
    fn test_bounding_box_zero_size_is_present() {
        let bbox = bounding_box(&tokenize("M 3 3")).unwrap();
        assert_eq!(bbox.width(), 0.0);
        assert_eq!(bbox.height(), 0.0);
    }

    #[test]
    fn test_emit_flips_y() {
        let plan = GlyphFitPlan::identity(300.0);
        let d = emit(&tokenize("M 0 0 L 300 300 Z"), &identity_frame(), &plan);
        assert_eq!(d, "M 0.00 300.00 L 300.00 0.00 Z");
    }

    #[test]
    fn test_emit_applies_origin_scale_and_shift() {
        let frame = NormalizationFrame {
            origin: Point::new(100.0, 100.0),
            square_size: 600.0,
            canvas_size: 300.0,
        };
        let plan = GlyphFitPlan {
            shift_x: 10.0,
            shift_y: -5.0,
            scale_factor: 0.5,
            advance_width: 300.0,
        };
        // x: (300 - 100) * 0.5 * 0.5 + 10 = 60
        // y: 300 - (200 - 100) * 0.25 - 5 = 270
        let d = emit(&tokenize("M300,200"), &frame, &plan);
        assert_eq!(d, "M 60.00 270.00");
    }
}
