//! Tag Format Reference
//!
//! This module documents the line-oriented text format as read and written
//! by this library.
//!
//! # Overview
//!
//! A document is a flat sequence of lines. Each meaningful line carries one
//! tag; structure comes from pairs of opening and closing tags, never from
//! indentation. The writer indents nested scopes only for readability.
//!
//! # Core Syntax
//!
//! ## Tags
//!
//! | Tag | Meaning |
//! |-----|---------|
//! | `<name>` | open a named scope (an object entry holding a container) |
//! | `</name>` | close the innermost scope |
//! | `<#Array>` | append an array to the current container and enter it |
//! | `<Array#>` | close the innermost scope |
//! | `<#Object>` | append an object to the current container and enter it |
//! | `<Object#>` | close the innermost scope |
//! | `<key="K" type="T" value="V">` | set entry `K` of the current scope |
//! | `<type="T" value="V">` | append an element to the current array |
//!
//! **Rules**:
//! - Only the span from the first `<` to the last `>` of a line is considered;
//!   text around it is ignored
//! - Lines without such a span, or with a span matching no form above, are
//!   ignored, so free text and blank lines act as comments
//! - Scope names contain no whitespace, `/` or `#`
//! - Attributes appear in the order shown, separated by whitespace, each value
//!   non-empty and free of `"`
//!
//! ## Scalar types
//!
//! | `type` | `value` | Reads as |
//! |--------|---------|----------|
//! | `String` | raw text | the text as-is |
//! | `Number` | text containing `.` | 64-bit float |
//! | `Number` | other text | signed integer, else unsigned, else float |
//! | `Boolean` | `false` | `false` |
//! | `Boolean` | anything else | `true` |
//!
//! Any other `type` is an error. Written numbers always distinguish floats:
//! `3.0` stays a float after a reload, `3` is an integer.
//!
//! # Example
//!
//! ```text
//! <key="name" type="String" value="edge">
//! <listeners>
//!   <#Object>
//!     <key="port" type="Number" value="80">
//!     <key="tls" type="Boolean" value="false">
//!   <Object#>
//!   <#Object>
//!     <key="port" type="Number" value="443">
//!     <key="tls" type="Boolean" value="true">
//!   <Object#>
//! </listeners>
//! <weights>
//!   <type="Number" value="0.25">
//!   <type="Number" value="0.75">
//! </weights>
//! ```
//!
//! # Reading Semantics
//!
//! The reader keeps a stack of open scopes. Writes go to the innermost one, or
//! to the document root when no scope is open.
//!
//! - A named scope turns its parent into an object (if it was unset) and adds
//!   the entry
//! - `<#Array>` / `<#Object>` turn the current target into an array if it is
//!   not one already, discarding what it held, then append the new element.
//!   With no scope open the root must be unset or already an array
//! - A positional scalar requires an open scope that is an array. With
//!   `ParseOptions::with_scalar_scopes`, an unset named scope becomes one
//! - A close tag with no open scope is an error
//! - Scopes left open at the end are accepted unless parsing is strict
//!
//! # Writing Semantics
//!
//! - A root object or array writes its children only
//! - Object entries holding containers become named scopes, array elements
//!   become `#Array` / `#Object` blocks
//! - `Null` children are skipped
//!
//! # Limitations
//!
//! - There is no escaping: keys or strings containing `"`, line breaks, or
//!   for keys whitespace, `/` and `#`, do not survive a round trip
//! - Empty strings are written but not read back
//! - Empty containers under a key read back as `Null`
//! - An array of scalars under a key is written as positional lines in a
//!   named scope, which reads back only with `scalar_scopes` enabled. The
//!   typed readers (`from_str` and friends) enable it
//! - A root array of scalars is written as positional lines, which cannot be
//!   read back
