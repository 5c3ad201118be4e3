//! Column alignment of comment blocks.
//!
//! Lines belonging to the configured tags are padded so that their tag,
//! type, name and description columns line up. Lines of the main
//! description are normalized to a single space after the delimiter and
//! every line is re-indented relative to the opening `/**`.
//!
//! Alignment is a pure function of a block: all state used while walking
//! its lines is local to a single call.

use std::sync::LazyLock;

use jsdoc_grammar::Block;
use jsdoc_grammar::Line;
use jsdoc_grammar::Tag;
use jsdoc_grammar::Tokens;
use regex::NoExpand;
use regex::Regex;

use crate::Config;
use crate::config::CustomSpacings;

/// Matches a leading hyphen of a description and the whitespace after it.
static HYPHEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*-\s+").expect("regex should compile"));

/// Gets the length of a token as a signed column count.
fn len(token: &str) -> i64 {
    token.chars().count() as i64
}

/// Creates `n` spaces, or nothing when `n` is not positive.
fn space(n: i64) -> String {
    if n > 0 {
        " ".repeat(n as usize)
    } else {
        String::new()
    }
}

/// Strips the `@` from a tag token.
fn bare(tag: &str) -> &str {
    tag.strip_prefix('@').unwrap_or(tag)
}

/// The widest value of each aligned column.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Width {
    /// The width of the leading whitespace of the opening line.
    start: i64,
    /// The widest tag.
    tag: i64,
    /// The widest type.
    ty: i64,
    /// The widest name.
    name: i64,
}

/// Column information used when no tag of the block has a type.
#[derive(Debug, Clone, Copy)]
struct Typeless {
    /// Whether every tag of the block lacks a type.
    has_no_types: bool,
    /// One more than the longest tag that has a name.
    max_named: i64,
    /// One more than the longest tag that has no name.
    max_unnamed: i64,
}

impl Typeless {
    /// Computes the typeless information of the given tags.
    fn new(tags: &[Tag]) -> Self {
        let longest = |named: bool| {
            tags.iter()
                .filter(|t| t.name.is_empty() != named)
                .map(|t| len(&t.tag) + 1)
                .max()
                .unwrap_or(i64::MIN)
        };

        Self {
            has_no_types: tags.iter().all(|t| t.ty.is_empty()),
            max_named: longest(true),
            max_unnamed: longest(false),
        }
    }
}

/// Which tokens have nothing following them on a line.
#[derive(Debug, Default, Clone, Copy)]
struct NothingAfter {
    /// Nothing follows the delimiter.
    delim: bool,
    /// Nothing follows the tag.
    tag: bool,
    /// Nothing follows the type.
    ty: bool,
    /// Nothing follows the name.
    name: bool,
}

/// Determines if the line at `index` is aligned.
///
/// A line without a tag is aligned when the nearest preceding tag is, or
/// when no tag precedes it.
fn should_align(tags: &[String], index: usize, source: &[Line]) -> bool {
    let tag = bare(&source[index].tokens.tag);
    if tags.iter().any(|t| t == tag) {
        return true;
    }

    if !tag.is_empty() {
        return false;
    }

    source[..index]
        .iter()
        .rev()
        .map(|line| bare(&line.tokens.tag))
        .find(|t| !t.is_empty())
        .is_none_or(|prev| tags.iter().any(|t| t == prev))
}

/// Measures the aligned lines of a block.
fn measure(tags: &[String], source: &[Line]) -> Width {
    (0..source.len())
        .filter(|i| should_align(tags, *i, source))
        .fold(Width::default(), |width, i| {
            let tokens = &source[i].tokens;
            Width {
                start: if tokens.delimiter == "/**" {
                    len(&tokens.start)
                } else {
                    width.start
                },
                tag: width.tag.max(len(&tokens.tag)),
                ty: width.ty.max(len(&tokens.ty)),
                name: width.name.max(len(&tokens.name)),
            }
        })
}

/// Pads the tokens of an aligned line.
fn align_tokens(tokens: &mut Tokens, width: Width, typeless: Typeless, spacings: CustomSpacings) {
    let mut nothing_after = NothingAfter::default();

    if tokens.description.is_empty() {
        nothing_after.name = true;
        tokens.post_name.clear();

        if tokens.name.is_empty() {
            nothing_after.ty = true;
            tokens.post_type.clear();

            if tokens.ty.is_empty() {
                nothing_after.tag = true;
                tokens.post_tag.clear();

                if tokens.tag.is_empty() {
                    nothing_after.delim = true;
                }
            }
        }
    }

    let mut name_adjustment = 0;
    let mut type_adjustment = 0;
    if typeless.has_no_types {
        nothing_after.tag = true;
        tokens.post_tag.clear();

        let tag = len(&tokens.tag);
        if tokens.name.is_empty() {
            name_adjustment = typeless.max_named.saturating_sub(tag);
        } else {
            name_adjustment = if typeless.max_named > typeless.max_unnamed {
                0
            } else {
                typeless
                    .max_unnamed
                    .saturating_sub(tag + len(&tokens.name) + 1)
                    .max(0)
            };
            type_adjustment = typeless.max_named.saturating_sub(tag);
        }
    }

    // A wrapped type line keeps its layout
    if tokens.tag.is_empty() && !tokens.ty.is_empty() {
        return;
    }

    tokens.post_delimiter = if nothing_after.delim {
        String::new()
    } else {
        space(spacings.post_delimiter() as i64)
    };

    if !nothing_after.tag {
        tokens.post_tag = space(width.tag - len(&tokens.tag) + spacings.post_tag() as i64);
    }

    if !nothing_after.ty {
        tokens.post_type = space(
            (width.ty - len(&tokens.ty) + spacings.post_type() as i64)
                .saturating_add(type_adjustment),
        );
    }

    if !nothing_after.name {
        tokens.post_name = if width.name == 0 {
            String::new()
        } else {
            space(
                (width.name - len(&tokens.name) + spacings.post_name() as i64)
                    .saturating_add(name_adjustment),
            )
        };
    }
}

/// Walks the lines of one block.
struct Aligner<'a> {
    /// The formatting configuration.
    config: &'a Config,
    /// The indentation of the opening line.
    indent: &'a str,
    /// The measured column widths.
    width: Width,
    /// The typeless column information.
    typeless: Typeless,
    /// Whether a tag has been seen.
    into_tags: bool,
}

impl Aligner<'_> {
    /// Produces the aligned tokens of the line at `index`.
    fn update(&mut self, source: &[Line], index: usize, indent_tag: bool) -> Tokens {
        let mut tokens = source[index].tokens.clone();
        if !tokens.tag.is_empty() {
            self.into_tags = true;
        }

        let is_empty = tokens.tag.is_empty()
            && tokens.name.is_empty()
            && tokens.ty.is_empty()
            && tokens.description.is_empty();

        if tokens.end == "*/" && is_empty {
            tokens.start = format!("{indent} ", indent = self.indent);
            return tokens;
        }

        match tokens.delimiter.as_str() {
            "/**" => tokens.start = self.indent.to_string(),
            "*" => tokens.start = format!("{indent} ", indent = self.indent),
            _ => {
                tokens.delimiter.clear();
                tokens.start = format!("{indent}  ", indent = self.indent);
            }
        }

        if !self.into_tags {
            if tokens.description.is_empty() {
                tokens.post_delimiter.clear();
            } else if !self.config.preserve_main_description_post_delimiter() {
                tokens.post_delimiter = " ".to_string();
            }
            return tokens;
        }

        let spacings = self.config.custom_spacings();
        let hyphen = format!("-{}", " ".repeat(spacings.post_hyphen()));
        tokens.description = HYPHEN
            .replace(&tokens.description, NoExpand(&hyphen))
            .into_owned();

        if should_align(self.config.tags(), index, source) {
            align_tokens(&mut tokens, self.width, self.typeless, spacings);
            if !self.config.disable_wrap_indent() && indent_tag {
                tokens.post_delimiter.push_str(self.config.wrap_indent());
            }
        }

        tokens
    }
}

/// Aligns a block whose opening line is indented by `indent`.
///
/// The derived fields of the block's tags are carried over unchanged; only
/// the source tokens are rewritten.
pub fn align(block: &Block, indent: &str, config: &Config) -> Block {
    let mut aligner = Aligner {
        config,
        indent,
        width: measure(config.tags(), &block.source),
        typeless: Typeless::new(&block.tags),
        into_tags: false,
    };

    let wrapping = !config.disable_wrap_indent();
    let mut tag_indent_mode = false;
    let source = block
        .source
        .iter()
        .enumerate()
        .map(|(index, line)| {
            let indent_tag = wrapping
                && tag_indent_mode
                && line.tokens.tag.is_empty()
                && !line.tokens.description.is_empty();
            let tokens = aligner.update(&block.source, index, indent_tag);
            if wrapping && !line.tokens.tag.is_empty() {
                tag_indent_mode = true;
            }
            Line::new(line.number, tokens)
        })
        .collect();

    Block {
        description: block.description.clone(),
        tags: block.tags.clone(),
        source,
        inline_tags: block.inline_tags.clone(),
        problems: block.problems.clone(),
    }
}

/// Gets the indentation of a block from the start of its first line.
pub fn indent_of(block: &Block) -> &str {
    block
        .source
        .first()
        .map(|line| line.tokens.start.as_str())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use jsdoc_grammar::parse_comment;
    use jsdoc_grammar::stringify;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::Builder;

    /// Aligns a comment with the given configuration.
    fn aligned_with(text: &str, config: &Config) -> String {
        let block = parse_comment(text, 0);
        stringify(&align(&block, indent_of(&block), config))
    }

    /// Aligns a comment with the default configuration.
    fn aligned(text: &str) -> String {
        aligned_with(text, &Config::default())
    }

    #[test]
    fn aligns_parameters() {
        let text = "/**\n * Adds.\n *\n * @param {string} a The first.\n * @param {number} bb \
                    The second.\n * @returns {string} The sum.\n */";
        assert_eq!(
            aligned(text),
            "/**\n * Adds.\n *\n * @param   {string} a  The first.\n * @param   {number} bb The \
             second.\n * @returns {string}    The sum.\n */"
        );
    }

    #[test]
    fn idempotent() {
        let text = "/**\n   * Main.\n * @param {string}   a - First\n *     wrapped.\n * \
                    @property {Object<string, number>} [bb=1]   Second.\n   */";
        let once = aligned(text);
        assert_eq!(aligned(&once), once);
    }

    #[test]
    fn description_columns_match() {
        let text = "/**\n * @param {string} a First.\n * @param {?number} long Second.\n */";
        let out = aligned(text);
        let columns: Vec<_> = out
            .lines()
            .filter(|l| l.contains('@'))
            .map(|l| l.find(|c: char| c.is_uppercase()).unwrap())
            .collect();
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0], columns[1]);
    }

    #[test]
    fn typeless_tags() {
        let text = "/**\n * @param foo The foo.\n * @param barbaz The bar.\n * @returns \
                    Nothing.\n */";
        assert_eq!(
            aligned(text),
            "/**\n * @param foo    The foo.\n * @param barbaz The bar.\n * @returns      \
             Nothing.\n */"
        );
    }

    #[test]
    fn unlisted_tags_untouched() {
        let text = "/**\n * @param {string} a First.\n * @see   {@link foo}\n */";
        assert_eq!(
            aligned(text),
            "/**\n * @param {string} a First.\n * @see   {@link foo}\n */"
        );
    }

    #[test]
    fn indentation() {
        let block = parse_comment("/**\n      * Text.\n      * @param {string} a\n   */", 4);
        let out = stringify(&align(&block, indent_of(&block), &Config::default()));
        assert_eq!(out, "    /**\n     * Text.\n     * @param {string} a\n     */");
    }

    #[test]
    fn hyphen_spacing() {
        let config = Builder::default()
            .custom_spacings(CustomSpacings {
                post_hyphen: Some(0),
                ..Default::default()
            })
            .try_build()
            .unwrap();
        assert_eq!(
            aligned_with("/**\n * @param {string} a -   First.\n */", &config),
            "/**\n * @param {string} a -First.\n */"
        );
    }

    #[test]
    fn custom_spacings() {
        let config = Builder::default()
            .custom_spacings(CustomSpacings {
                post_tag: Some(2),
                post_type: Some(3),
                post_name: Some(0),
                ..Default::default()
            })
            .try_build()
            .unwrap();
        assert_eq!(
            aligned_with("/**\n * @param {string} a First.\n */", &config),
            "/**\n * @param  {string}   a First.\n */"
        );
    }

    #[test]
    fn main_description_spacing() {
        let text = "/**\n *    Indented text.\n *\n * @param {string} a\n */";
        assert_eq!(
            aligned(text),
            "/**\n * Indented text.\n *\n * @param {string} a\n */"
        );

        let config = Builder::default()
            .preserve_main_description_post_delimiter(true)
            .try_build()
            .unwrap();
        assert_eq!(aligned_with(text, &config), text);
    }

    #[test]
    fn wrap_indent() {
        let text = "/**\n * @param {string} a First\n * line.\n */";
        let config = Builder::default().wrap_indent("  ").try_build().unwrap();
        assert_eq!(
            aligned_with(text, &config),
            "/**\n * @param {string} a First\n *                     line.\n */"
        );

        let config = Builder::default()
            .wrap_indent("  ")
            .disable_wrap_indent(true)
            .try_build()
            .unwrap();
        assert_eq!(
            aligned_with(text, &config),
            "/**\n * @param {string} a First\n *                   line.\n */"
        );
    }

    #[test]
    fn blocks_are_independent() {
        let first = parse_comment("/**\n * @param {string} a\n */", 0);
        let second = parse_comment("/**\n * Text only.\n */", 0);
        let config = Config::default();
        let _ = align(&first, "", &config);
        assert_eq!(
            stringify(&align(&second, "", &config)),
            "/**\n * Text only.\n */"
        );
    }
}
