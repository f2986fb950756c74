//! Pure state transitions: (Page, Action) → Transition.
//!
//! This is the core logic of the page. Fully testable without a terminal.
//! Actions that do not apply to the current focus return the page
//! unchanged (no-op).

use crate::timers::TimerKey;
use crate::validation::SubmitOutcome;

use super::state::{Action, Context, Effect, Page, Target, Transition};

/// Pure state transition function.
///
/// Given the current page, an action and the read-only context, produces
/// the next transition. The effects boundary interprets the result.
pub fn update(page: Page, action: &Action, ctx: &Context) -> Transition {
    match action {
        Action::Quit => Transition::Quit,
        Action::Click(target) => click(page, *target, ctx),
        Action::Activate => match page.focus {
            Some(target) => click(page, target, ctx),
            None => Transition::Page(page),
        },
        Action::HoverEnter => {
            if page.events.is_hovered() {
                Transition::Page(page)
            } else {
                Transition::Page(Page {
                    events: page.events.hover_enter(),
                    ..page
                })
            }
        }
        Action::HoverLeave => {
            if page.events.is_hovered() {
                Transition::Page(Page {
                    events: page.events.hover_leave(),
                    ..page
                })
            } else {
                Transition::Page(page)
            }
        }
        Action::KeyDown(key) => Transition::Effects(
            Page {
                events: page.events.key_down(key.as_str()),
                ..page
            },
            vec![Effect::Schedule {
                key: TimerKey::KeyHighlight,
                after: ctx.timings.highlight_clear,
            }],
        ),
        Action::TypeChar(c) => match page.focus {
            Some(Target::Input(field)) => Transition::Page(Page {
                form: page.form.push_char(field, *c, &ctx.validator),
                ..page
            }),
            _ => Transition::Page(page),
        },
        Action::Backspace => match page.focus {
            Some(Target::Input(field)) => Transition::Page(Page {
                form: page.form.pop_char(field, &ctx.validator),
                ..page
            }),
            _ => Transition::Page(page),
        },
        Action::Submit => submit(page, ctx),
        Action::FocusNext => Transition::Page(move_focus(page, 1)),
        Action::FocusPrev => Transition::Page(move_focus(page, -1)),
        Action::TimerFired(TimerKey::KeyHighlight) => Transition::Page(Page {
            events: page.events.clear_key_highlight(),
            ..page
        }),
        Action::TimerFired(TimerKey::FormReset) => Transition::Page(Page {
            form: page.form.reset(),
            ..page
        }),
    }
}

// ============================================================================
// PER-TARGET HANDLERS
// ============================================================================

/// A click focuses the target (when focusable), then runs its handler.
fn click(page: Page, target: Target, ctx: &Context) -> Transition {
    let page = if target.is_focusable() {
        Page {
            focus: Some(target),
            ..page
        }
    } else {
        page
    };

    match target {
        Target::ClickBox => Transition::Page(Page {
            events: page.events.click(),
            ..page
        }),
        // Hover is driven by pointer movement, not clicks
        Target::HoverBox => Transition::Page(page),
        Target::ResetEvents => Transition::Effects(
            Page {
                events: page.events.reset(),
                ..page
            },
            vec![Effect::Cancel(TimerKey::KeyHighlight)],
        ),
        Target::ThemeToggle => Transition::Page(Page {
            theme: page.theme.toggle(),
            ..page
        }),
        Target::Increment => Transition::Page(Page {
            counter: page.counter.increment(),
            ..page
        }),
        Target::Decrement => Transition::Page(Page {
            counter: page.counter.decrement(),
            ..page
        }),
        Target::FaqQuestion(index) => Transition::Page(Page {
            faq: page.faq.toggle(index),
            ..page
        }),
        Target::TabHeader(index) => Transition::Page(Page {
            tabs: page.tabs.select(index),
            ..page
        }),
        // Clicking an input only focuses it
        Target::Input(_) => Transition::Page(page),
        Target::Submit => submit(page, ctx),
    }
}

/// Submit: validate everything; only a fully valid form schedules the reset.
fn submit(page: Page, ctx: &Context) -> Transition {
    let (form, outcome) = page.form.submit(&ctx.validator);
    let page = Page { form, ..page };

    match outcome {
        SubmitOutcome::Accepted => {
            tracing::info!("form submitted");
            Transition::Effects(
                page,
                vec![Effect::Schedule {
                    key: TimerKey::FormReset,
                    after: ctx.timings.success_reset,
                }],
            )
        }
        // A stale reset from an earlier success must not wipe the
        // fields the user is now correcting.
        SubmitOutcome::Rejected { .. } => {
            Transition::Effects(page, vec![Effect::Cancel(TimerKey::FormReset)])
        }
    }
}

/// Cycle focus through the focusable controls, wrapping at both ends.
fn move_focus(page: Page, step: isize) -> Page {
    let order = page.focus_order();
    if order.is_empty() {
        return page;
    }

    let len = order.len() as isize;
    let next = match page.focus.and_then(|f| order.iter().position(|&t| t == f)) {
        Some(current) => (current as isize + step).rem_euclid(len),
        None if step >= 0 => 0,
        None => len - 1,
    };

    Page {
        focus: Some(order[next as usize]),
        ..page
    }
}

// ============================================================================
// TESTS
// ============================================================================
