//! At-rule snippets.

use crate::candidate::{Candidate, CompletionKind};

/// (label, snippet, description)
const AT_RULES: &[(&str, &str, &str)] = &[
    ("@import", "@import ${1:file}", "Includes the styles and symbols of another file"),
    ("@use", "@use '${1:module}'", "Loads a module"),
    ("@forward", "@forward '${1:module}'", "Re-exports a module's members"),
    ("@mixin", "@mixin ${1:name}($2)\n\t$0", "Defines a reusable block of styles"),
    ("@include", "@include ${1:mixin}", "Includes a mixin"),
    ("@function", "@function ${1:name}($2)\n\t@return $0", "Defines a function"),
    ("@return", "@return ${1:value}", "Returns a value from a function"),
    ("@extend", "@extend ${1:selector}", "Inherits the styles of another selector"),
    ("@if", "@if ${1:condition}\n\t$0", "Conditional block"),
    ("@else if", "@else if ${1:condition}\n\t$0", "Alternative conditional block"),
    ("@else", "@else\n\t$0", "Fallback block"),
    ("@each", "@each \\$${1:item} in ${2:list}\n\t$0", "Iterates over a list or map"),
    ("@for", "@for \\$${1:i} from ${2:1} through ${3:3}\n\t$0", "Counts through a range"),
    ("@while", "@while ${1:condition}\n\t$0", "Loops while a condition holds"),
    ("@media", "@media ${1:screen}\n\t$0", "Media query block"),
    ("@supports", "@supports (${1:feature})\n\t$0", "Feature query block"),
    ("@keyframes", "@keyframes ${1:name}\n\t$0", "Animation keyframes"),
    (
        "@font-face",
        "@font-face\n\tfont-family: ${1:name}\n\tsrc: url($2)",
        "Custom font definition",
    ),
    ("@at-root", "@at-root ${1:selector}", "Emits styles at the document root"),
    ("@content", "@content", "Outputs the block passed to a mixin"),
    ("@debug", "@debug ${1:value}", "Prints a value while compiling"),
    ("@warn", "@warn ${1:message}", "Prints a warning while compiling"),
    ("@error", "@error ${1:message}", "Aborts compilation with an error"),
    ("@charset", "@charset \"${1:UTF-8}\"", "Character encoding of the stylesheet"),
];

pub fn at_rule_completions() -> Vec<Candidate> {
    AT_RULES
        .iter()
        .map(|(label, snippet, description)| {
            Candidate::snippet(*label, *snippet, CompletionKind::Keyword).with_detail(*description)
        })
        .collect()
}
