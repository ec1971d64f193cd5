mod differ;
mod path_match;

pub use differ::Differ;
pub use path_match::longest_suffix_matches;
