//! # Request Body Markdown
//!
//! Renders the human readable description of file uploads. The generator only needs
//! the body of the block; it strips [`REQUEST_BODY_HEADING`] itself.

use crate::catalogue::Argument;

/// Heading that opens every request body block.
pub const REQUEST_BODY_HEADING: &str = "### Request Body\n\n";

/// Produces the Markdown description of a request body from its file arguments.
pub trait BodyFormatter {
    /// Renders the block for the given file arguments, heading included.
    fn body_block(&self, args: &[&Argument]) -> String;
}

/// The Markdown layout used by the RPC reference docs.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownFormatter;

impl BodyFormatter for MarkdownFormatter {
    fn body_block(&self, args: &[&Argument]) -> String {
        let mut block = String::from(REQUEST_BODY_HEADING);
        for arg in args {
            block.push_str(&format!(
                "Argument `{}` is of file type. This endpoint expects one or several files \
                 (depending on the command) in the body of the request as 'multipart/form-data'.\n\n",
                arg.name
            ));
        }
        block
    }
}
