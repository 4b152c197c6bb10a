use crate::document::{Fragment, Node};
pub use token::Token;
pub use token_encoder::{AttributeEncoder, BaseEncoder, MarkEncoder, NodeTypeIds, TokenEncoder};

pub mod token;
pub mod token_encoder;

/// Flattens the `start..end` range of a fragment into a list of tokens, one
/// token per position.
///
/// Containers contribute an opening token only when their start lies in the
/// range and a closing token only when their end does, so partial ranges
/// never produce tokens for content outside of them.
///
/// # Panics
///
/// If the range does not lie within the fragment.
#[must_use]
pub fn tokens(fragment: &Fragment, start: usize, end: usize, encoder: &dyn TokenEncoder) -> Vec<Token> {
    assert!(
        start <= end && end <= fragment.size(),
        "Cannot tokenize {start}..{end} of a fragment of size {}",
        fragment.size()
    );

    let mut target = Vec::with_capacity(end - start);
    push_tokens(fragment, start, end, encoder, &mut target);
    target
}

fn push_tokens(
    fragment: &Fragment,
    start: usize,
    end: usize,
    encoder: &dyn TokenEncoder,
    target: &mut Vec<Token>,
) {
    for (offset, child) in fragment.iter_with_offsets() {
        if offset >= end {
            break;
        }
        let child_end = offset + child.size();
        let from = offset.max(start);
        let to = child_end.min(end);
        if from >= to {
            continue;
        }

        match child {
            Node::Text { text, marks } => {
                let marks = encoder.encode_marks(marks);
                target.extend(
                    text.chars()
                        .skip(from - offset)
                        .take(to - from)
                        .map(|ch| Token::Character {
                            ch,
                            marks: marks.clone(),
                        }),
                );
            }
            Node::Leaf { kind, .. } => target.push(Token::Leaf {
                kind: kind.clone(),
                detail: encoder.encode_node(child),
            }),
            Node::Container { kind, content, .. } => {
                if from == offset {
                    target.push(Token::Open {
                        kind: kind.clone(),
                        detail: encoder.encode_node(child),
                    });
                }
                push_tokens(
                    content,
                    from.max(offset + 1) - offset - 1,
                    to.min(child_end - 1) - offset - 1,
                    encoder,
                    target,
                );
                if to == child_end {
                    target.push(Token::Close(encoder.close_id(child)));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::document::Mark;

    fn doc() -> Fragment {
        Fragment::new(vec![
            Node::container("paragraph", vec![Node::text("ab"), Node::leaf("image")]),
            Node::container("heading", vec![Node::text("c")]),
        ])
    }

    #[test]
    fn test_one_token_per_position() {
        let doc = doc();
        let tokens = tokens(&doc, 0, doc.size(), &BaseEncoder::default());
        assert_eq!(tokens.len(), doc.size());
        assert_eq!(
            tokens,
            vec![
                Token::open("paragraph"),
                Token::character('a'),
                Token::character('b'),
                Token::Leaf {
                    kind: "image".to_owned(),
                    detail: String::new()
                },
                Token::Close(0),
                Token::open("heading"),
                Token::character('c'),
                Token::Close(0),
            ]
        );
    }

    #[test]
    fn test_partial_ranges() {
        let doc = doc();
        let rendered: String = tokens(&doc, 2, 6, &BaseEncoder::default())
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_snapshot!(rendered, @"b[image]</><heading>");
        assert!(tokens(&doc, 3, 3, &BaseEncoder::default()).is_empty());
    }

    #[test]
    fn test_marks_distinguish_characters() {
        let plain = Fragment::new(vec![Node::text("a")]);
        let bold = Fragment::new(vec![Node::text("a").with_marks(vec![Mark::new("strong")])]);
        let encoder = MarkEncoder::default();
        assert_ne!(tokens(&plain, 0, 1, &encoder), tokens(&bold, 0, 1, &encoder));

        let encoder = BaseEncoder::default();
        assert_eq!(tokens(&plain, 0, 1, &encoder), tokens(&bold, 0, 1, &encoder));
    }

    #[test]
    fn test_close_tokens_carry_type_ids() {
        let doc = doc();
        let encoder = BaseEncoder::new(NodeTypeIds::new(["paragraph", "heading"]));
        let tokens = tokens(&doc, 0, doc.size(), &encoder);
        assert_eq!(tokens[4], Token::Close(1));
        assert_eq!(tokens[7], Token::Close(2));
    }

    #[test]
    #[should_panic(expected = "Cannot tokenize")]
    fn test_out_of_range_panics() {
        let doc = doc();
        let _ = tokens(&doc, 0, doc.size() + 1, &BaseEncoder::default());
    }
}
