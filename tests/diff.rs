use std::{collections::BTreeMap, fs, path::Path};

use pretty_assertions::assert_eq;
use revision_changeset::{
    BaseEncoder, DiffAlgorithm, DiffOptions, DiffRange, Fragment, Mark, Node, diff_tokens, tokens,
};
use serde::Deserialize;
use test_case::test_case;

/// `ExampleDiff` is a diff test case: two documents and the changed ranges
/// expected between them, as `[from_a, to_a, from_b, to_b]` token indices.
///
/// Blocks are written as `p: text` or `h1: text`; inline content may be a
/// list mixing plain strings and `mark: text` pairs.
///
/// When several edit scripts are equally short, the table search may settle
/// on a different one than Myers does; `lcs_expected` then holds its result.
#[derive(Debug, Deserialize)]
struct ExampleDiff {
    name: String,
    a: Vec<Block>,
    b: Vec<Block>,
    expected: Vec<[usize; 4]>,
    lcs_expected: Option<Vec<[usize; 4]>>,
    #[serde(default)]
    split: bool,
    #[serde(default = "default_fenced")]
    fenced: bool,
    max_diff_size: Option<usize>,
    max_table_cells: Option<usize>,
}

fn default_fenced() -> bool { true }

type Block = BTreeMap<String, Content>;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Content {
    Plain(String),
    Inline(Vec<Inline>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Inline {
    Plain(String),
    Marked(BTreeMap<String, String>),
}

impl ExampleDiff {
    fn options(&self, algorithm: DiffAlgorithm) -> DiffOptions {
        let mut options = DiffOptions::default()
            .with_encoder(BaseEncoder::default())
            .with_algorithm(algorithm)
            .with_split_insertions(self.split);
        if !self.fenced {
            options = options.with_fenced_nodes(Vec::<String>::new());
        }
        if let Some(max_diff_size) = self.max_diff_size {
            options = options.with_max_diff_size(max_diff_size);
        }
        if let Some(max_table_cells) = self.max_table_cells {
            options = options.with_max_table_cells(max_table_cells);
        }
        options
    }

    fn assert_diff(&self, algorithm: DiffAlgorithm) {
        let (a, b) = (to_fragment(&self.a), to_fragment(&self.b));
        let encoder = BaseEncoder::default();
        let result = diff_tokens(
            &tokens(&a, 0, a.size(), &encoder),
            &tokens(&b, 0, b.size(), &encoder),
            &self.options(algorithm),
        );
        let result: Vec<[usize; 4]> = result
            .into_iter()
            .map(|range| [range.from_a, range.to_a, range.from_b, range.to_b])
            .collect();
        let expected = match (algorithm, &self.lcs_expected) {
            (DiffAlgorithm::Lcs, Some(lcs_expected)) => lcs_expected,
            _ => &self.expected,
        };
        assert_eq!(&result, expected, "{} ({algorithm:?})", self.name);
    }
}

fn to_fragment(blocks: &[Block]) -> Fragment {
    blocks
        .iter()
        .flat_map(|block| block.iter().map(|(kind, content)| to_node(kind, content)))
        .collect()
}

fn to_node(kind: &str, content: &Content) -> Node {
    let children = match content {
        Content::Plain(text) => vec![Node::text(text.as_str())],
        Content::Inline(items) => items
            .iter()
            .flat_map(|item| match item {
                Inline::Plain(text) => vec![Node::text(text.as_str())],
                Inline::Marked(marked) => marked
                    .iter()
                    .map(|(mark, text)| Node::text(text.as_str()).with_marks(vec![Mark::new(mark.as_str())]))
                    .collect(),
            })
            .collect(),
    };
    match kind {
        "p" => Node::container("paragraph", children),
        level => {
            let level = level.strip_prefix('h').expect("Unknown block type");
            Node::container("heading", children).with_attr("level", level)
        }
    }
}

fn get_all_examples() -> Vec<ExampleDiff> {
    let examples_dir = Path::new("tests/examples");
    let entries = fs::read_dir(examples_dir)
        .expect("Failed to read examples directory")
        .collect::<Vec<_>>();

    let mut examples = Vec::new();
    for entry in entries {
        let path = entry.expect("Failed to read directory entry").path();
        if path.is_file() && path.extension().and_then(|ext| ext.to_str()) == Some("yml") {
            let file = fs::File::open(&path).expect("Failed to open example file");
            for document in serde_yaml::Deserializer::from_reader(file) {
                examples.push(ExampleDiff::deserialize(document).expect("Failed to parse example"));
            }
        }
    }
    assert!(!examples.is_empty(), "No diff examples found");
    examples
}

#[test_case(DiffAlgorithm::Myers; "myers")]
#[test_case(DiffAlgorithm::Lcs; "lcs")]
fn test_examples(algorithm: DiffAlgorithm) {
    for example in get_all_examples() {
        example.assert_diff(algorithm);
    }
}

fn paragraph_tokens(text: &str) -> Vec<revision_changeset::Token> {
    let fragment = Fragment::new(vec![Node::container("paragraph", vec![Node::text(text)])]);
    tokens(&fragment, 0, fragment.size(), &BaseEncoder::default())
}

fn range(from_a: usize, to_a: usize, from_b: usize, to_b: usize) -> DiffRange {
    DiffRange {
        from_a,
        to_a,
        from_b,
        to_b,
    }
}

#[test_case(DiffAlgorithm::Myers; "myers")]
#[test_case(DiffAlgorithm::Lcs; "lcs")]
fn test_huge_insertions(algorithm: DiffAlgorithm) {
    let (xs, bs) = ("x".repeat(200), "b".repeat(20));
    let short = paragraph_tokens(&format!("a{bs}c"));
    let long = paragraph_tokens(&format!("a{xs}{bs}{xs}c"));
    let options = DiffOptions::default()
        .with_encoder(BaseEncoder::default())
        .with_algorithm(algorithm);

    assert_eq!(
        diff_tokens(&short, &long, &options),
        vec![range(2, 2, 2, 202), range(22, 22, 222, 422)]
    );
    assert_eq!(
        diff_tokens(&long, &short, &options),
        vec![range(2, 202, 2, 2), range(222, 422, 22, 22)]
    );
}

#[test_case(DiffAlgorithm::Myers; "myers")]
#[test_case(DiffAlgorithm::Lcs; "lcs")]
fn test_completely_different_paragraphs(algorithm: DiffAlgorithm) {
    let a = paragraph_tokens(&"a".repeat(1200));
    let b = paragraph_tokens(&"b".repeat(1200));
    let options = DiffOptions::default()
        .with_encoder(BaseEncoder::default())
        .with_algorithm(algorithm)
        .with_max_diff_size(100)
        .with_max_table_cells(1000);

    assert_eq!(diff_tokens(&a, &b, &options), vec![range(1, 1201, 1, 1201)]);
}
