//! Doc renderer.
//!
//! Stack-machine printer in the Wadler/Prettier style. Each command carries
//! an indentation and a mode; a group in break mode is tried flat first and
//! kept flat when everything up to the next possible line break fits in the
//! remaining width.

use rustc_hash::FxHashMap;

use super::{Doc, GroupId, LineKind};
use crate::context::FormatConfig;
use crate::emitter::{Emitter, StringEmitter};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Mode {
    Break,
    Flat,
}

/// A doc to print, or the unprinted tail of a fill.
#[derive(Copy, Clone)]
enum Item<'d> {
    Doc(&'d Doc),
    FillRest(&'d [Doc]),
}

#[derive(Copy, Clone)]
struct Command<'d> {
    indent: usize,
    mode: Mode,
    item: Item<'d>,
}

/// Render `doc` to a string within `config.print_width` columns.
pub fn render(doc: &Doc, config: &FormatConfig) -> String {
    let mut doc = doc.clone();
    propagate_breaks(&mut doc);

    let mut emitter = StringEmitter::with_line_ending(config.end_of_line);
    Renderer {
        config,
        emitter: &mut emitter,
        group_modes: FxHashMap::default(),
        pos: 0,
    }
    .print(&doc);
    emitter.output()
}

/// Mark every group that contains a hard break as broken.
///
/// Returns whether `doc` forces its enclosing group to break.
fn propagate_breaks(doc: &mut Doc) -> bool {
    match doc {
        Doc::BreakParent => true,
        Doc::Concat(parts) | Doc::Fill(parts) => parts
            .iter_mut()
            .fold(false, |breaks, part| propagate_breaks(part) | breaks),
        Doc::Group(group) => {
            if propagate_breaks(&mut group.contents) {
                group.should_break = true;
            }
            group.should_break
        }
        Doc::Indent(contents) | Doc::DedentToRoot(contents) => propagate_breaks(contents),
        Doc::IfBreak(if_break) => {
            let in_break = propagate_breaks(&mut if_break.break_contents);
            let in_flat = propagate_breaks(&mut if_break.flat_contents);
            in_break || in_flat
        }
        Doc::Nil | Doc::Text(_) | Doc::Line(_) => false,
    }
}

#[inline]
fn text_width(text: &str) -> usize {
    text.chars().count()
}

struct Renderer<'c, E: Emitter> {
    config: &'c FormatConfig,
    emitter: &'c mut E,
    group_modes: FxHashMap<GroupId, Mode>,
    /// Current column.
    pos: usize,
}

impl<E: Emitter> Renderer<'_, E> {
    fn print(&mut self, doc: &Doc) {
        let mut cmds = vec![Command {
            indent: 0,
            mode: Mode::Break,
            item: Item::Doc(doc),
        }];
        let mut should_remeasure = false;

        while let Some(cmd) = cmds.pop() {
            let doc = match cmd.item {
                Item::Doc(doc) => doc,
                Item::FillRest(parts) => {
                    self.print_fill(cmd, parts, &mut cmds);
                    continue;
                }
            };
            match doc {
                Doc::Nil | Doc::BreakParent => {}
                Doc::Text(text) => {
                    self.emitter.emit(text);
                    self.pos += text_width(text);
                }
                Doc::Concat(parts) => {
                    for part in parts.iter().rev() {
                        cmds.push(Command {
                            item: Item::Doc(part),
                            ..cmd
                        });
                    }
                }
                Doc::Indent(contents) => cmds.push(Command {
                    indent: cmd.indent + self.config.tab_width,
                    mode: cmd.mode,
                    item: Item::Doc(contents),
                }),
                Doc::DedentToRoot(contents) => cmds.push(Command {
                    indent: 0,
                    mode: cmd.mode,
                    item: Item::Doc(contents),
                }),
                Doc::Group(group) => {
                    let mode = if cmd.mode == Mode::Flat && !should_remeasure {
                        if group.should_break {
                            Mode::Break
                        } else {
                            Mode::Flat
                        }
                    } else {
                        should_remeasure = false;
                        let flat = Command {
                            indent: cmd.indent,
                            mode: Mode::Flat,
                            item: Item::Doc(&group.contents),
                        };
                        let remaining = self.remaining_width();
                        if !group.should_break && self.fits(vec![flat], &cmds, remaining, false) {
                            Mode::Flat
                        } else {
                            Mode::Break
                        }
                    };
                    tracing::trace!(id = ?group.id, ?mode, "group");
                    cmds.push(Command {
                        indent: cmd.indent,
                        mode,
                        item: Item::Doc(&group.contents),
                    });
                    if let Some(id) = group.id {
                        self.group_modes.insert(id, mode);
                    }
                }
                Doc::IfBreak(if_break) => {
                    let mode = self.mode_for(if_break.group_id, cmd.mode);
                    let contents = if mode == Mode::Break {
                        &if_break.break_contents
                    } else {
                        &if_break.flat_contents
                    };
                    cmds.push(Command {
                        item: Item::Doc(contents),
                        ..cmd
                    });
                }
                Doc::Fill(parts) => self.print_fill(cmd, parts, &mut cmds),
                Doc::Line(kind) => {
                    if cmd.mode == Mode::Flat && !kind.is_hard() {
                        if *kind == LineKind::Normal {
                            self.emitter.emit(" ");
                            self.pos += 1;
                        }
                        continue;
                    }
                    if cmd.mode == Mode::Flat {
                        // A hard line inside a flat group: the enclosing groups
                        // must be measured again from the new line.
                        should_remeasure = true;
                    }
                    if *kind == LineKind::Literal {
                        self.emitter.emit_newline();
                        self.pos = 0;
                    } else {
                        self.emitter.trim_trailing_whitespace();
                        self.emitter.emit_newline();
                        self.emitter.emit_indent(cmd.indent);
                        self.pos = cmd.indent;
                    }
                }
            }
        }
    }

    /// Greedy fill: keep each content flat if it fits, and keep a separator
    /// flat only when the content after it fits on the same line too.
    fn print_fill<'d>(&mut self, cmd: Command<'d>, parts: &'d [Doc], cmds: &mut Vec<Command<'d>>) {
        let Some(content) = parts.first() else {
            return;
        };
        let remaining = self.remaining_width();
        let flat = |doc: &'d Doc| Command {
            indent: cmd.indent,
            mode: Mode::Flat,
            item: Item::Doc(doc),
        };
        let broken = |doc: &'d Doc| Command {
            indent: cmd.indent,
            mode: Mode::Break,
            item: Item::Doc(doc),
        };

        let content_fits = self.fits(vec![flat(content)], &[], remaining, true);
        let Some(separator) = parts.get(1) else {
            cmds.push(if content_fits { flat(content) } else { broken(content) });
            return;
        };
        let Some(next_content) = parts.get(2) else {
            if content_fits {
                cmds.push(flat(separator));
                cmds.push(flat(content));
            } else {
                cmds.push(broken(separator));
                cmds.push(broken(content));
            }
            return;
        };

        cmds.push(Command {
            indent: cmd.indent,
            mode: cmd.mode,
            item: Item::FillRest(&parts[2..]),
        });
        let pair_fits = self.fits(
            vec![flat(next_content), flat(separator), flat(content)],
            &[],
            remaining,
            true,
        );
        if pair_fits {
            cmds.push(flat(separator));
            cmds.push(flat(content));
        } else if content_fits {
            cmds.push(broken(separator));
            cmds.push(flat(content));
        } else {
            cmds.push(broken(separator));
            cmds.push(broken(content));
        }
    }

    /// Whether `next` fits in `width` columns before the next line break.
    ///
    /// `next` is a stack: the last command is measured first. Once it is
    /// exhausted, the pending `rest` commands are measured in print order.
    fn fits<'d>(
        &self,
        mut next: Vec<Command<'d>>,
        rest: &[Command<'d>],
        width: usize,
        must_be_flat: bool,
    ) -> bool {
        let mut width = isize::try_from(width).unwrap_or(isize::MAX);
        let mut rest_idx = rest.len();

        while width >= 0 {
            let Some(cmd) = next.pop() else {
                if rest_idx == 0 {
                    return true;
                }
                rest_idx -= 1;
                next.push(rest[rest_idx]);
                continue;
            };
            let parts = match cmd.item {
                Item::FillRest(parts) => parts,
                Item::Doc(Doc::Concat(parts) | Doc::Fill(parts)) => parts.as_slice(),
                Item::Doc(doc) => {
                    match doc {
                        Doc::Nil | Doc::BreakParent | Doc::Concat(_) | Doc::Fill(_) => {}
                        Doc::Text(text) => {
                            width -= isize::try_from(text_width(text)).unwrap_or(isize::MAX);
                        }
                        Doc::Indent(contents) | Doc::DedentToRoot(contents) => next.push(Command {
                            item: Item::Doc(contents),
                            ..cmd
                        }),
                        Doc::Group(group) => {
                            if must_be_flat && group.should_break {
                                return false;
                            }
                            let mode = if group.should_break { Mode::Break } else { cmd.mode };
                            next.push(Command {
                                mode,
                                item: Item::Doc(&group.contents),
                                ..cmd
                            });
                        }
                        Doc::IfBreak(if_break) => {
                            let mode = self.mode_for(if_break.group_id, cmd.mode);
                            let contents = if mode == Mode::Break {
                                &if_break.break_contents
                            } else {
                                &if_break.flat_contents
                            };
                            next.push(Command {
                                item: Item::Doc(contents),
                                ..cmd
                            });
                        }
                        Doc::Line(kind) => {
                            if cmd.mode == Mode::Break || kind.is_hard() {
                                return true;
                            }
                            if *kind == LineKind::Normal {
                                width -= 1;
                            }
                        }
                    }
                    continue;
                }
            };
            for part in parts.iter().rev() {
                next.push(Command {
                    item: Item::Doc(part),
                    ..cmd
                });
            }
        }
        false
    }

    /// Mode recorded for `group_id`, or `current` when there is none.
    ///
    /// A group that has not been printed yet counts as flat.
    fn mode_for(&self, group_id: Option<GroupId>, current: Mode) -> Mode {
        match group_id {
            Some(id) => self.group_modes.get(&id).copied().unwrap_or(Mode::Flat),
            None => current,
        }
    }

    fn remaining_width(&self) -> usize {
        self.config.print_width.saturating_sub(self.pos)
    }
}
