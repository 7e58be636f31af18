//! RcDoc-based pretty-printer with termcolor annotations.
//!
//! Role
//! - Convert kernel terms into annotated documents suitable for width-aware rendering.
//! - Provide colored output for terminals and plain strings for logs/tests.
//! - The [`PrettyDoc`] trait is shared with downstream crates so goals and proof states
//!   render with the same styles.
use std::io::{self, Write};

use pretty::{FmtWrite, RcDoc, RenderAnnotated};
use termcolor::{Color, ColorSpec, WriteColor};

use crate::expr::{Expr, ExprKind};
use crate::level::Level;

/// Default line width used by `Display` implementations.
pub const DEFAULT_WIDTH: usize = 80;

/// Styles used to annotate parts of the pretty-printed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Punct, // commas, arrows, colons
    /// Parentheses are colored by nesting depth so matching pairs share a color.
    Paren(u8),
    Keyword,  // fun, Pi, Sort
    Constant, // global names
    Local,    // bound variables and hypotheses
    Meta,     // metavariables
    Turnstile,
}

impl Style {
    fn to_color_spec(self) -> ColorSpec {
        let mut s = ColorSpec::new();
        match self {
            Style::Punct => {
                s.set_dimmed(true);
            }
            Style::Paren(depth) => {
                let fg = match depth % 4 {
                    0 => Color::Blue,
                    1 => Color::Green,
                    2 => Color::Yellow,
                    _ => Color::Magenta,
                };
                s.set_fg(Some(fg)).set_dimmed(true);
            }
            Style::Keyword => {
                s.set_fg(Some(Color::Cyan)).set_bold(true);
            }
            Style::Constant => {
                s.set_fg(Some(Color::Magenta));
            }
            Style::Local => {
                s.set_fg(Some(Color::Green)).set_bold(true);
            }
            Style::Meta => {
                s.set_fg(Some(Color::Red));
            }
            Style::Turnstile => {
                s.set_fg(Some(Color::Yellow)).set_bold(true);
            }
        }
        s
    }
}

pub fn styled<S: Into<String>>(style: Style, s: S) -> RcDoc<'static, Style> {
    RcDoc::as_string(s.into()).annotate(style)
}

pub fn punct(s: &'static str) -> RcDoc<'static, Style> {
    styled(Style::Punct, s)
}

fn kw(s: &'static str) -> RcDoc<'static, Style> {
    styled(Style::Keyword, s)
}

#[inline]
fn lparen(depth: u8) -> RcDoc<'static, Style> {
    RcDoc::as_string("(").annotate(Style::Paren(depth))
}

#[inline]
fn rparen(depth: u8) -> RcDoc<'static, Style> {
    RcDoc::as_string(")").annotate(Style::Paren(depth))
}

/// Binding strength: binders < application < atoms.
fn precedence(e: &Expr) -> u8 {
    match e.kind() {
        ExprKind::Lambda { .. } | ExprKind::Pi { .. } => 1,
        ExprKind::App(..) => 2,
        ExprKind::Sort(l) if !matches!(l, Level::Zero) => 2,
        _ => 3,
    }
}

fn parenthesized(e: &Expr, min_prec: u8, depth: u8) -> RcDoc<'static, Style> {
    if precedence(e) < min_prec {
        lparen(depth)
            .append(expr_doc(e, depth.wrapping_add(1)))
            .append(rparen(depth))
            .group()
    } else {
        expr_doc(e, depth)
    }
}

fn binder_doc(
    head: &'static str,
    binder: &crate::name::Name,
    domain: &Expr,
    body: &Expr,
    depth: u8,
) -> RcDoc<'static, Style> {
    kw(head)
        .append(RcDoc::space())
        .append(lparen(depth))
        .append(styled(Style::Local, binder.to_string()))
        .append(RcDoc::space())
        .append(punct(":"))
        .append(RcDoc::space())
        .append(expr_doc(domain, depth.wrapping_add(1)))
        .append(rparen(depth))
        .append(punct(","))
        .append(RcDoc::line())
        .append(expr_doc(body, depth))
        .nest(2)
        .group()
}

/// Depth-aware document for a term.
pub fn expr_doc(e: &Expr, depth: u8) -> RcDoc<'static, Style> {
    match e.kind() {
        ExprKind::Var(i) => styled(Style::Local, format!("#{}", i)),
        ExprKind::Sort(Level::Zero) => kw("Prop"),
        ExprKind::Sort(l) => kw("Sort")
            .append(RcDoc::space())
            .append(RcDoc::as_string(l.to_string())),
        ExprKind::Constant { name, levels } => {
            let doc = styled(Style::Constant, name.to_string());
            if levels.is_empty() {
                doc
            } else {
                let levels: Vec<String> = levels.iter().map(|l| l.to_string()).collect();
                doc.append(punct(".{"))
                    .append(RcDoc::as_string(levels.join(" ")))
                    .append(punct("}"))
            }
        }
        ExprKind::MetaVar(name) => styled(Style::Meta, format!("?{}", name)),
        ExprKind::App(f, a) => parenthesized(f, 2, depth)
            .append(RcDoc::line())
            .append(parenthesized(a, 3, depth))
            .nest(2)
            .group(),
        ExprKind::Lambda {
            binder,
            domain,
            body,
        } => binder_doc("fun", binder, domain, body, depth),
        ExprKind::Pi {
            binder,
            domain,
            body,
        } if binder.is_anonymous() => parenthesized(domain, 2, depth)
            .append(RcDoc::space())
            .append(punct("->"))
            .append(RcDoc::line())
            .append(expr_doc(body, depth))
            .group(),
        ExprKind::Pi {
            binder,
            domain,
            body,
        } => binder_doc("Pi", binder, domain, body, depth),
    }
}

// A writer that maps Style annotations to termcolor ColorSpec on a WriteColor sink.
struct ColorWriter<'w, W: WriteColor + Write> {
    out: &'w mut W,
}

impl<'a, 'w, W: WriteColor + Write> RenderAnnotated<'a, Style> for ColorWriter<'w, W> {
    fn push_annotation(&mut self, ann: &'a Style) -> io::Result<()> {
        self.out.set_color(&ann.to_color_spec())
    }
    fn pop_annotation(&mut self) -> io::Result<()> {
        self.out.reset()
    }
}

impl<'w, W: WriteColor + Write> pretty::Render for ColorWriter<'w, W> {
    type Error = io::Error;
    fn write_str(&mut self, s: &str) -> io::Result<usize> {
        self.out.write_all(s.as_bytes())?;
        Ok(s.len())
    }
    fn write_str_all(&mut self, s: &str) -> io::Result<()> {
        self.out.write_all(s.as_bytes())
    }
    fn fail_doc(&self) -> Self::Error {
        io::Error::other("render failed")
    }
}

/// Pretty-printing conveniences shared by every printable kernel or tactic value.
pub trait PrettyDoc {
    /// Build an RcDoc representation with style annotations.
    fn pretty_doc(&self) -> RcDoc<'static, Style>;

    /// Render with colors to any termcolor writer at the given width.
    fn pretty_render_to<W: WriteColor + Write>(&self, width: usize, out: &mut W) -> io::Result<()> {
        let mut cw = ColorWriter { out };
        self.pretty_doc().render_raw(width, &mut cw)
    }

    /// Format into a plain string (no colors) at the given width.
    fn pretty_string(&self, width: usize) -> String {
        let mut buf = String::new();
        let _ = self.pretty_doc().render_fmt(width, &mut buf);
        buf
    }
}

impl PrettyDoc for Expr {
    fn pretty_doc(&self) -> RcDoc<'static, Style> {
        expr_doc(self, 0)
    }
}

/// Implements `Display` through [`PrettyDoc`] at [`DEFAULT_WIDTH`].
#[macro_export]
macro_rules! impl_display_via_pretty {
    ($t:ty) => {
        impl std::fmt::Display for $t {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let mut w = pretty::FmtWrite::new(f);
                $crate::pretty::PrettyDoc::pretty_doc(self)
                    .render_raw($crate::pretty::DEFAULT_WIDTH, &mut w)
            }
        }
    };
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut w = FmtWrite::new(f);
        self.pretty_doc().render_raw(DEFAULT_WIDTH, &mut w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_rendering() {
        let p = Expr::cnst("p");
        let e = Expr::arrow(p.clone(), Expr::mk_false());
        assert_eq!(e.to_string(), "p -> false");

        let app = Expr::mk_app(Expr::cnst("f"), [Expr::var(0), Expr::cnst("g").app(p)]);
        assert_eq!(app.to_string(), "f #0 (g p)");

        let lam = Expr::lambda("x", Expr::prop(), Expr::var(0));
        assert_eq!(lam.to_string(), "fun (x : Prop), #0");
        assert_eq!(Expr::mvar("m").to_string(), "?m");
    }
}
