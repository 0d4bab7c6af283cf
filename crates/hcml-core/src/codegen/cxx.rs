//! Built-in C++ construct catalog

use crate::error::{HcmlError, SyntaxError, SyntaxErrorKind};
use crate::tree::{NodeId, Tree};

use super::{Emitter, Generator};

/// Default primary generator emitting C++
#[derive(Debug, Default, Clone, Copy)]
pub struct CxxGenerator;

impl Generator for CxxGenerator {
    fn emit(&self, em: &mut Emitter<'_, '_>, node: NodeId) -> Result<(), HcmlError> {
        let tree = em.tree();
        let Some(name) = tree.tag_name(node) else {
            return em.emit_text(node);
        };
        let Some(construct) = Construct::lookup(name) else {
            return em.extend(node);
        };
        construct.check(tree, node)?;
        construct.emit(em, node)
    }
}

/// Delimiters of a wrapping construct
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Wrapper {
    open: &'static str,
    close: &'static str,
    /// Separator after each wrapped child
    separator: Option<&'static str>,
}

const fn wrapper(open: &'static str, close: &'static str) -> Construct {
    Construct::Wrap(Wrapper {
        open,
        close,
        separator: None,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Construct {
    String,
    Const,
    Empty,
    Invoke,
    Call,
    List,
    Var,
    Code,
    Line,
    Print,
    Wrap(Wrapper),
    Binary(&'static str),
    Keyword(&'static str),
    TypeInit,
    Condition,
    Case,
    Else,
    Each,
    For,
    While,
    Do,
}

const CATALOG: &[(&str, Construct)] = &[
    ("string", Construct::String),
    ("const", Construct::Const),
    ("empty", Construct::Empty),
    ("invoke", Construct::Invoke),
    ("call", Construct::Call),
    ("list", Construct::List),
    ("var", Construct::Var),
    ("code", Construct::Code),
    ("line", Construct::Line),
    ("print", Construct::Print),
    ("subscript", wrapper("[", "]")),
    (
        "block",
        Construct::Wrap(Wrapper {
            open: "{\n",
            close: "}",
            separator: Some("\n"),
        }),
    ),
    ("parentheses", wrapper("(", ")")),
    ("post_increase", wrapper("(", ")++")),
    ("pre_increase", wrapper("++(", ")")),
    ("post_decrease", wrapper("(", ")--")),
    ("pre_decrease", wrapper("--(", ")")),
    ("set", Construct::Binary("=")),
    ("great", Construct::Binary(">")),
    ("greatequal", Construct::Binary(">=")),
    ("less", Construct::Binary("<")),
    ("lessequan", Construct::Binary("<=")),
    ("equal", Construct::Binary("==")),
    ("notequal", Construct::Binary("!=")),
    ("plus", Construct::Binary("+")),
    ("minus", Construct::Binary("-")),
    ("times", Construct::Binary("*")),
    ("divid", Construct::Binary("/")),
    ("mod", Construct::Binary("%")),
    ("return", Construct::Keyword("return;")),
    ("break", Construct::Keyword("break;")),
    ("continue", Construct::Keyword("continue;")),
    ("true", Construct::Keyword("true")),
    ("false", Construct::Keyword("false")),
    ("new", Construct::Keyword("new")),
    ("delete", Construct::Keyword("delete ")),
    ("typeinit", Construct::TypeInit),
    ("condition", Construct::Condition),
    ("case", Construct::Case),
    ("else", Construct::Else),
    ("each", Construct::Each),
    ("for", Construct::For),
    ("while", Construct::While),
    ("do", Construct::Do),
];

/// Child count a construct accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arity {
    Any,
    AtLeast(usize),
    Exactly(usize),
}

/// Preconditions verified before anything is emitted
#[derive(Debug, Clone, Copy)]
struct Requirement {
    children: Arity,
    props: &'static [&'static str],
    needs_owner: bool,
}

impl Requirement {
    const NONE: Requirement = Requirement {
        children: Arity::Any,
        props: &[],
        needs_owner: false,
    };

    const fn children(children: Arity) -> Self {
        Self {
            children,
            ..Self::NONE
        }
    }

    const fn props(props: &'static [&'static str]) -> Self {
        Self {
            props,
            ..Self::NONE
        }
    }
}

impl Construct {
    pub(crate) fn lookup(name: &[u8]) -> Option<Construct> {
        CATALOG
            .iter()
            .find(|(entry, _)| entry.as_bytes() == name)
            .map(|&(_, construct)| construct)
    }

    fn requirement(self) -> Requirement {
        match self {
            Construct::Invoke | Construct::Call | Construct::Var => Requirement::props(&["name"]),
            Construct::TypeInit => Requirement::props(&["type"]),
            Construct::Print | Construct::Wrap(_) => Requirement::children(Arity::AtLeast(1)),
            Construct::Binary(_) => Requirement::children(Arity::Exactly(2)),
            Construct::Case => Requirement {
                children: Arity::AtLeast(2),
                props: &[],
                needs_owner: true,
            },
            Construct::Else => Requirement {
                children: Arity::AtLeast(1),
                props: &[],
                needs_owner: true,
            },
            Construct::Each => Requirement::children(Arity::AtLeast(3)),
            Construct::For => Requirement::children(Arity::AtLeast(4)),
            Construct::While | Construct::Do => Requirement::children(Arity::AtLeast(2)),
            Construct::String
            | Construct::Const
            | Construct::Code
            | Construct::Empty
            | Construct::List
            | Construct::Line
            | Construct::Keyword(_)
            | Construct::Condition => Requirement::NONE,
        }
    }

    fn check(self, tree: &Tree<'_>, node: NodeId) -> Result<(), SyntaxError> {
        let fail = |kind| SyntaxError::new(tree.display_name(node), kind);
        let req = self.requirement();

        if req.needs_owner && tree.owner(node).is_none() {
            return Err(fail(SyntaxErrorKind::NoOwner));
        }
        for &prop in req.props {
            if !tree.has_prop(node, prop) {
                return Err(fail(SyntaxErrorKind::MissingProperty(prop)));
            }
        }

        let found = tree.child_count(node);
        match req.children {
            Arity::AtLeast(expected) if found < expected => {
                if let Construct::Wrap(w) = self {
                    return Err(fail(SyntaxErrorKind::EmptyWrapper {
                        open: w.open.trim_end(),
                        close: w.close,
                    }));
                }
                return Err(fail(SyntaxErrorKind::MissingChildren { expected, found }));
            }
            Arity::Exactly(expected) if found != expected => {
                return Err(fail(SyntaxErrorKind::ChildCount { expected, found }));
            }
            _ => {}
        }

        match self {
            Construct::Const | Construct::Code => {
                let first = tree.first_child(node);
                if first.and_then(|c| tree.text(c)).is_none() {
                    return Err(fail(SyntaxErrorKind::RawTextExpected));
                }
            }
            Construct::String => {
                if let Some(first) = tree.first_child(node) {
                    if tree.text(first).is_none() {
                        return Err(fail(SyntaxErrorKind::RawTextExpected));
                    }
                }
            }
            Construct::Condition => {
                let first = tree.first_child(node);
                if first.and_then(|c| tree.tag_name(c)) != Some(&b"case"[..]) {
                    return Err(fail(SyntaxErrorKind::FirstChildMustBe { expected: "case" }));
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Write the construct; `check` has already passed.
    ///
    /// Each arm calls out to a small function so the frame of this function,
    /// which sits on the stack once per nesting level, stays small.
    fn emit(self, em: &mut Emitter<'_, '_>, node: NodeId) -> Result<(), HcmlError> {
        match self {
            Construct::String => emit_string(em, node),
            Construct::Const | Construct::Code => emit_raw(em, node),
            Construct::Empty => Ok(()),
            Construct::Invoke => emit_invoke(em, node),
            Construct::Call => emit_named_args(em, node, "name"),
            Construct::List => emit_list(em, node),
            Construct::TypeInit => emit_named_args(em, node, "type"),
            Construct::Var => emit_var(em, node),
            Construct::Line => emit_line(em, node),
            Construct::Print => emit_print(em, node),
            Construct::Wrap(w) => emit_wrapped(em, node, w),
            Construct::Binary(op) => emit_binary(em, node, op),
            Construct::Keyword(keyword) => em.push_str(keyword),
            Construct::Condition => emit_condition(em, node),
            Construct::Case => emit_case(em, node),
            Construct::Else => emit_else(em, node),
            Construct::Each => emit_each(em, node),
            Construct::For => emit_for(em, node),
            Construct::While => emit_while(em, node),
            Construct::Do => emit_do(em, node),
        }
    }
}

/// `index`-th child of `node`
fn child(tree: &Tree<'_>, node: NodeId, index: usize) -> Result<NodeId, HcmlError> {
    tree.child_at(node, index).ok_or_else(|| {
        SyntaxError::new(
            tree.display_name(node),
            SyntaxErrorKind::MissingChildren {
                expected: index + 1,
                found: tree.child_count(node),
            },
        )
        .into()
    })
}

/// Text of the first child, empty when there is none
fn raw_child<'src>(tree: &Tree<'src>, node: NodeId) -> &'src [u8] {
    tree.first_child(node)
        .and_then(|c| tree.text(c))
        .unwrap_or_default()
}

fn emit_string(em: &mut Emitter<'_, '_>, node: NodeId) -> Result<(), HcmlError> {
    let text = raw_child(em.tree(), node);
    em.push_str("\"")?;
    em.push_bytes(text)?;
    em.push_str("\"")
}

fn emit_raw(em: &mut Emitter<'_, '_>, node: NodeId) -> Result<(), HcmlError> {
    let text = raw_child(em.tree(), node);
    em.push_bytes(text)
}

fn emit_invoke(em: &mut Emitter<'_, '_>, node: NodeId) -> Result<(), HcmlError> {
    let tree = em.tree();
    em.push_str(if tree.has_prop(node, "ptr") { "->" } else { "." })?;
    emit_named_args(em, node, "name")
}

/// `<prop>(args)` for `call` and `typeinit`
fn emit_named_args(em: &mut Emitter<'_, '_>, node: NodeId, prop: &str) -> Result<(), HcmlError> {
    let tree = em.tree();
    em.push_bytes(tree.prop(node, prop).unwrap_or_default())?;
    em.push_str("(")?;
    em.generate_args(tree.first_child(node))?;
    em.push_str(")")
}

fn emit_list(em: &mut Emitter<'_, '_>, node: NodeId) -> Result<(), HcmlError> {
    let first = em.tree().first_child(node);
    em.push_str("{")?;
    em.generate_args(first)?;
    em.push_str("}")
}

fn emit_var(em: &mut Emitter<'_, '_>, node: NodeId) -> Result<(), HcmlError> {
    let tree = em.tree();
    if let Some(ty) = tree.prop(node, "type") {
        em.push_bytes(ty)?;
        em.push_str(" ")?;
    }
    let name = tree.prop(node, "name").unwrap_or_default();
    if tree.has_prop(node, "val") {
        em.push_str("(*")?;
        em.push_bytes(name)?;
        em.push_str(")")?;
    } else if tree.has_prop(node, "addr") || tree.has_prop(node, "ref") {
        em.push_str("(&")?;
        em.push_bytes(name)?;
        em.push_str(")")?;
    } else {
        em.push_bytes(name)?;
    }
    match tree.first_child(node) {
        Some(init) => em.generate(init, None),
        None => Ok(()),
    }
}

fn emit_line(em: &mut Emitter<'_, '_>, node: NodeId) -> Result<(), HcmlError> {
    if let Some(first) = em.tree().first_child(node) {
        em.generate(first, None)?;
    }
    em.push_str(";")
}

fn emit_print(em: &mut Emitter<'_, '_>, node: NodeId) -> Result<(), HcmlError> {
    let first = child(em.tree(), node, 0)?;
    em.push_str(em.print_method())?;
    em.push_str("(")?;
    em.generate(first, None)?;
    em.push_str(");")
}

fn emit_wrapped(em: &mut Emitter<'_, '_>, node: NodeId, w: Wrapper) -> Result<(), HcmlError> {
    let first = child(em.tree(), node, 0)?;
    em.push_str(w.open)?;
    em.generate(first, w.separator)?;
    em.push_str(w.close)
}

fn emit_binary(em: &mut Emitter<'_, '_>, node: NodeId, op: &str) -> Result<(), HcmlError> {
    let tree = em.tree();
    em.generate_one(child(tree, node, 0)?, None)?;
    em.push_str(" ")?;
    em.push_str(op)?;
    em.push_str(" ")?;
    em.generate_one(child(tree, node, 1)?, None)
}

fn emit_condition(em: &mut Emitter<'_, '_>, node: NodeId) -> Result<(), HcmlError> {
    let first = child(em.tree(), node, 0)?;
    em.generate(first, None)
}

fn emit_case(em: &mut Emitter<'_, '_>, node: NodeId) -> Result<(), HcmlError> {
    let tree = em.tree();
    let is_first = tree
        .owner(node)
        .and_then(|owner| tree.first_child(owner))
        == Some(node);
    em.push_str(if is_first { "if ( " } else { "else if ( " })?;
    em.generate_one(child(tree, node, 0)?, None)?;
    em.push_str(" ) ")?;
    em.generate(child(tree, node, 1)?, None)
}

fn emit_else(em: &mut Emitter<'_, '_>, node: NodeId) -> Result<(), HcmlError> {
    let first = child(em.tree(), node, 0)?;
    em.push_str("else ")?;
    em.generate(first, Some("\n"))
}

fn emit_each(em: &mut Emitter<'_, '_>, node: NodeId) -> Result<(), HcmlError> {
    let tree = em.tree();
    em.push_str("for ( ")?;
    em.generate_one(child(tree, node, 0)?, None)?;
    em.push_str(" : ")?;
    em.generate_one(child(tree, node, 1)?, None)?;
    em.push_str(" ) ")?;
    em.generate(child(tree, node, 2)?, None)
}

fn emit_for(em: &mut Emitter<'_, '_>, node: NodeId) -> Result<(), HcmlError> {
    let tree = em.tree();
    em.push_str("for ( ")?;
    em.generate_one(child(tree, node, 0)?, None)?;
    em.push_str("; ")?;
    em.generate_one(child(tree, node, 1)?, None)?;
    em.push_str("; ")?;
    em.generate_one(child(tree, node, 2)?, None)?;
    em.push_str(" ) ")?;
    em.generate(child(tree, node, 3)?, None)
}

fn emit_while(em: &mut Emitter<'_, '_>, node: NodeId) -> Result<(), HcmlError> {
    let tree = em.tree();
    em.push_str("while ( ")?;
    em.generate_one(child(tree, node, 0)?, None)?;
    em.push_str(" ) ")?;
    em.generate(child(tree, node, 1)?, None)
}

fn emit_do(em: &mut Emitter<'_, '_>, node: NodeId) -> Result<(), HcmlError> {
    let tree = em.tree();
    em.push_str("do ")?;
    em.generate(child(tree, node, 1)?, None)?;
    em.push_str(" while ( ")?;
    em.generate_one(child(tree, node, 0)?, None)?;
    em.push_str(" );")
}
