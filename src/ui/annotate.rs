//! Colored inline rendering of per-token quality tags

use crate::model::Tag;
use console::Style;

/// Map a BAD probability onto the red-green ramp used for token colors:
/// 0.0 is full green, 0.5 the yellow midpoint, 1.0 full red.
pub fn probability_to_rgb(probability: f32) -> (u8, u8, u8) {
    let red = (2.0 * probability * 255.0).clamp(0.0, 255.0) as u8;
    let green = (2.0 * (1.0 - probability) * 255.0).clamp(0.0, 255.0) as u8;
    (red, green, 90)
}

/// Nearest ANSI 256-color cube index for an RGB triple
fn color256(rgb: (u8, u8, u8)) -> u8 {
    let scale = |c: u8| -> u16 { (u16::from(c) * 5 + 127) / 255 };
    (16 + 36 * scale(rgb.0) + 6 * scale(rgb.1) + scale(rgb.2)) as u8
}

/// Render a token line with its tags, colored by BAD probability.
///
/// In plain mode each token is shown as `token/TAG` so the output stays
/// meaningful in logs and pipes.
pub fn annotate_tokens(tokens: &[&str], tags: &[Tag], probabilities: &[f32], color: bool) -> String {
    tokens
        .iter()
        .zip(tags.iter())
        .zip(probabilities.iter())
        .map(|((token, tag), probability)| {
            if color {
                let style = Style::new().color256(color256(probability_to_rgb(*probability)));
                let style = if *tag == Tag::Bad {
                    style.underlined()
                } else {
                    style
                };
                style.apply_to(*token).to_string()
            } else {
                format!("{}/{}", token, tag)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a sentence-level HTER line
pub fn format_hter(hter: f32) -> String {
    format!("Target sentence fixing effort (HTER): {:.3}", hter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_ramp_endpoints() {
        assert_eq!(probability_to_rgb(0.0), (0, 255, 90));
        assert_eq!(probability_to_rgb(0.5), (255, 255, 90));
        assert_eq!(probability_to_rgb(1.0), (255, 0, 90));
    }

    #[test]
    fn color256_stays_in_cube() {
        for rgb in [(0, 0, 0), (255, 255, 255), (255, 0, 90), (0, 255, 90)] {
            let index = color256(rgb);
            assert!((16..=231).contains(&index));
        }
    }

    #[test]
    fn plain_annotation_carries_tags() {
        let line = annotate_tokens(
            &["hallo", "welt"],
            &[Tag::Ok, Tag::Bad],
            &[0.0, 1.0],
            false,
        );
        assert_eq!(line, "hallo/OK welt/BAD");
    }

    #[test]
    fn colored_annotation_keeps_tokens() {
        let line = annotate_tokens(&["hallo", "welt"], &[Tag::Ok, Tag::Bad], &[0.0, 1.0], true);
        assert!(line.contains("hallo"));
        assert!(line.contains("welt"));
    }

    #[test]
    fn hter_formats_three_decimals() {
        assert_eq!(
            format_hter(0.322581),
            "Target sentence fixing effort (HTER): 0.323"
        );
    }
}
