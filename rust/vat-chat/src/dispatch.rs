//! The intent dispatcher.
//!
//! An utterance is run through every rule group, in order. Each group is a
//! ladder of mutually exclusive rules (see [`RuleGroup`]); several groups may
//! contribute to the same reply, so "hello, what is 2 + 3?" both greets and
//! answers. When no group said anything the "did you mean" fallback answers
//! instead.
//!
//! Group order:
//!
//! 1. greeting
//! 2. arithmetic
//! 3. discourse subject
//! 4. time of day
//! 5. knowledge (is-a, property queries, object queries, "X is Y")
//! 6. quantity statements
//! 7. quantity questions
//! 8. politeness
//! 9. mirroring
//! 10. capabilities
//! 11. host commands (at most one per utterance)
//! 12. farewell
//! 13. thanks
//! 14. agreement, including blank input

use regex::Regex;
use vat_pattern::inflect::capitalize;
use vat_pattern::{Document, Pattern, Span, Tag, TextMode, tag};

use crate::capability::{CAPABILITIES, listing};
use crate::clock::{Clock, SystemClock, spoken_time};
use crate::error::ChatError;
use crate::fallback;
use crate::host::HostCommand;
use crate::memory::Memory;
use crate::respond::{Phrase, Reply};
use crate::rule::{Flow, Rule, RuleGroup, Turn};
use crate::slot::{Dimension, Slots, text_after};
use crate::tool::ToolRewriter;

const DONT_KNOW: &str = "I don't know.";

/// The outcome of dispatching one utterance.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub replies: Vec<Reply>,
    pub commands: Vec<HostCommand>,
}

pub struct Dispatcher {
    groups: Vec<RuleGroup>,
    slots: Slots,
    tools: ToolRewriter,
    user_name: String,
    clock: Box<dyn Clock>,
}

impl Dispatcher {
    /// Compile the rule table for a user.
    pub fn new(user_name: impl Into<String>) -> Result<Self, ChatError> {
        Ok(Dispatcher {
            groups: vec![
                greeting()?,
                arithmetic()?,
                subject()?,
                time_of_day()?,
                knowledge()?,
                quantity_write()?,
                quantity_query()?,
                politeness()?,
                mirroring()?,
                capabilities()?,
                commands()?,
                farewell()?,
                thanks()?,
                agreement()?,
            ],
            slots: Slots::new()?,
            tools: ToolRewriter::new()?,
            user_name: user_name.into(),
            clock: Box::new(SystemClock),
        })
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn groups(&self) -> &[RuleGroup] {
        &self.groups
    }

    /// Classify one utterance, updating `memory` as the rules say.
    pub fn dispatch(&self, text: &str, memory: &mut Memory) -> Response {
        let doc = tag(text);
        let mut turn = Turn {
            doc: &doc,
            memory,
            user_name: &self.user_name,
            clock: self.clock.as_ref(),
            slots: &self.slots,
            tools: &self.tools,
            replies: Vec::new(),
            commands: Vec::new(),
        };

        for group in &self.groups {
            group.evaluate(&mut turn);
        }

        let Turn {
            mut replies,
            commands,
            ..
        } = turn;
        if replies.is_empty() {
            tracing::debug!(text, "no rule produced a reply, falling back");
            replies.push(Reply::Text(fallback::reply(text, CAPABILITIES)));
        }
        Response { replies, commands }
    }
}

/// True when the span is a question word or pronoun rather than the name of
/// something worth remembering.
fn names_nothing(span: Span<'_>) -> bool {
    span.is_empty()
        || span
            .tokens()
            .iter()
            .any(|token| token.has_tag(Tag::QuestionWord) || token.has_tag(Tag::Pronoun))
}

fn captures<'d>(doc: &'d Document, pattern: &Pattern) -> Option<Vec<Span<'d>>> {
    doc.captures(pattern)
        .filter(|spans| spans.iter().all(|span| !span.is_empty()))
}

fn greeting() -> Result<RuleGroup, ChatError> {
    Ok(RuleGroup::new("greeting").rule(
        Rule::new("hello", |turn| {
            let hello = format!("Hello {}!", turn.user_name);
            turn.say(hello);
            Flow::Handled
        })
        .on("(hello|hi|hey)")?,
    ))
}

fn arithmetic() -> Result<RuleGroup, ChatError> {
    let integers = Regex::new(r"\d+")?;
    let operation = |name: &'static str, expression: &str, compute: fn(i64, i64) -> Option<String>| {
        let integers = integers.clone();
        Rule::new(name, move |turn| {
            let operands: Vec<i64> = integers
                .find_iter(turn.text())
                .take(2)
                .map_while(|found| found.as_str().parse().ok())
                .collect();
            if let [a, b] = operands[..] {
                if let Some(answer) = compute(a, b) {
                    turn.say(answer);
                }
            }
            Flow::Handled
        })
        .on_regex(expression)
    };

    Ok(RuleGroup::new("arithmetic")
        .rule(operation("add", r"\d+ *\+ *\d+", |a, b| {
            a.checked_add(b).map(|sum| sum.to_string())
        })?)
        .rule(operation("subtract", r"\d+ *- *\d+", |a, b| {
            a.checked_sub(b).map(|difference| difference.to_string())
        })?)
        .rule(operation("multiply", r"\d+ *\* *\d+", |a, b| {
            a.checked_mul(b).map(|product| product.to_string())
        })?)
        .rule(operation("divide", r"\d+ */ *\d+", |a, b| {
            if b == 0 {
                Some("I can't divide by zero.".to_string())
            } else if a % b == 0 {
                Some((a / b).to_string())
            } else {
                Some((a as f64 / b as f64).to_string())
            }
        })?))
}

fn subject() -> Result<RuleGroup, ChatError> {
    let topic = Pattern::parse("^let's talk about")?;
    Ok(RuleGroup::new("subject")
        .rule(
            Rule::new("set subject", move |turn| {
                let Some(stated) = text_after(turn.doc, &topic) else {
                    return Flow::Pass;
                };
                turn.memory.talk_about(&stated);
                turn.phrase(Phrase::Ok);
                Flow::Handled
            })
            .on("^let's talk about .")?,
        )
        .rule(
            Rule::new("query subject", |turn| {
                let answer = format!("We're talking about {}.", turn.memory.subject());
                turn.say(answer);
                Flow::Handled
            })
            .on("^what are we talking about")?,
        ))
}

fn time_of_day() -> Result<RuleGroup, ChatError> {
    Ok(RuleGroup::new("time").rule(
        Rule::new("what time", |turn| {
            let answer = format!("It's {}.", spoken_time(turn.clock.now()));
            turn.say(answer);
            Flow::Handled
        })
        .on("^what time is it")?,
    ))
}

fn knowledge() -> Result<RuleGroup, ChatError> {
    let is_a = Pattern::parse("[.] is (a|an) .")?;
    let is_a_anchor = Pattern::parse(". is (a|an)")?;
    let property_of = Pattern::parse("^what is #Determiner? [.] of #Determiner? [.]")?;
    let properties_of = Pattern::parse("^what are #Determiner? [.] of #Determiner? [.]")?;
    let know_about = Pattern::parse("^what do you know about #Determiner? [.]")?;
    let what_is = Pattern::parse("^what is #Determiner? [.]$")?;
    let is = Pattern::parse("[.] is [.]")?;

    Ok(RuleGroup::new("knowledge")
        .rule(
            Rule::new("is a", move |turn| {
                let object = turn.doc.match_span(&is_a);
                let class = turn.doc.after(&is_a_anchor).text(TextMode::Raw);
                if names_nothing(object) || class.is_empty() {
                    return Flow::Pass;
                }
                turn.memory.add_class(&object.text(TextMode::Raw), &class);
                turn.phrase(Phrase::TakeNote);
                Flow::Handled
            })
            .on("[.] is (a|an) .")?,
        )
        .rule(
            Rule::new("property of", move |turn| {
                let Some(spans) = captures(turn.doc, &property_of) else {
                    return Flow::Pass;
                };
                let property = spans[0].text(TextMode::Normal);
                let object = spans[1].text(TextMode::Normal);
                let answer = match turn.memory.values(&object, &property) {
                    Some(values) => format!("{}.", capitalize(&values[0])),
                    None => DONT_KNOW.to_string(),
                };
                turn.say(answer);
                Flow::Handled
            })
            .on("^what is #Determiner? . of #Determiner? .")?,
        )
        .rule(
            Rule::new("properties of", move |turn| {
                let Some(spans) = captures(turn.doc, &properties_of) else {
                    return Flow::Pass;
                };
                let property = spans[0].text(TextMode::Singular);
                let object = spans[1].text(TextMode::Normal);
                let answer = match turn.memory.values(&object, &property) {
                    Some(values) => format!("{}.", capitalize(&values.join(" and "))),
                    None => DONT_KNOW.to_string(),
                };
                turn.say(answer);
                Flow::Handled
            })
            .on("^what are #Determiner? . of #Determiner? .")?,
        )
        .rule(
            Rule::new("what do you know", move |turn| {
                let object = turn.doc.match_span(&know_about).text(TextMode::Normal);
                let answer = turn
                    .memory
                    .frame(&object)
                    .and_then(|frame| frame.describe())
                    .unwrap_or_else(|| "Nothing.".to_string());
                turn.say(answer);
                Flow::Handled
            })
            .on("^what do you know about #Determiner? .")?,
        )
        .rule(
            Rule::new("what is", move |turn| {
                let object = turn.doc.match_span(&what_is);
                if object.is_empty() {
                    return Flow::Pass;
                }
                let answer = turn
                    .memory
                    .frame(&object.text(TextMode::Normal))
                    .and_then(|frame| frame.describe())
                    .unwrap_or_else(|| DONT_KNOW.to_string());
                turn.say(answer);
                Flow::Handled
            })
            .on("^what is #Determiner? .$")?,
        )
        .rule(
            Rule::new("x is y", move |turn| {
                let Some(spans) = captures(turn.doc, &is) else {
                    return Flow::Pass;
                };
                if names_nothing(spans[0]) || names_nothing(spans[1]) {
                    return Flow::Pass;
                }
                let object = spans[0].text(TextMode::Raw);
                let value = spans[1].text(TextMode::Raw);
                if let Some(property) = turn.memory.link(&object, &value) {
                    tracing::debug!(%object, %value, %property, "linked value to object");
                }
                turn.phrase(Phrase::TakeNote);
                Flow::Handled
            })
            .on(". is .")?,
        ))
}

fn quantity_write() -> Result<RuleGroup, ChatError> {
    let has = Pattern::parse("[.] has [#Value] [.]")?;
    Ok(RuleGroup::new("quantity write").rule(
        Rule::new("x has n p", move |turn| {
            let Some(spans) = captures(turn.doc, &has) else {
                return Flow::Pass;
            };
            if names_nothing(spans[0]) {
                return Flow::Pass;
            }
            turn.memory.set_quantity(
                &spans[0].text(TextMode::Raw),
                &spans[2].text(TextMode::Normal),
                &spans[1].text(TextMode::Raw),
            );
            turn.phrase(Phrase::TakeNote);
            Flow::Handled
        })
        .on(". has #Value .")?,
    ))
}

fn quantity_query() -> Result<RuleGroup, ChatError> {
    let how_many = Pattern::parse("^how many [.] (does|do) #Determiner? [.] have")?;
    Ok(RuleGroup::new("quantity query").rule(
        Rule::new("how many", move |turn| {
            let Some(spans) = captures(turn.doc, &how_many) else {
                return Flow::Pass;
            };
            let property = spans[0].text(TextMode::Normal);
            let object = spans[1].text(TextMode::Normal);
            let answer = match turn.memory.values(&object, &property) {
                Some(values) => format!("{}.", values[0]),
                None => DONT_KNOW.to_string(),
            };
            turn.say(answer);
            Flow::Handled
        })
        .on("^how many . (does|do) #Determiner? . have")?,
    ))
}

fn politeness() -> Result<RuleGroup, ChatError> {
    Ok(RuleGroup::new("politeness").rule(
        Rule::new("how are you", |turn| {
            turn.say("I'm fine and you?");
            Flow::Handled
        })
        .on("^how are you")?,
    ))
}

fn mirroring() -> Result<RuleGroup, ChatError> {
    let adjective = Pattern::parse("^you are #Determiner [#Adjective] (bot|assistant)")?;
    Ok(RuleGroup::new("mirroring").rule(
        Rule::new("you are", move |turn| {
            let adjective = turn.doc.match_span(&adjective).text(TextMode::Raw);
            let article = match adjective.to_lowercase().chars().next() {
                Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
                _ => "a",
            };
            turn.say(format!("You are {article} {adjective} person."));
            Flow::Handled
        })
        .on("^you are #Determiner #Adjective (bot|assistant)")?,
    ))
}

fn capabilities() -> Result<RuleGroup, ChatError> {
    Ok(RuleGroup::new("capabilities")
        .rule(
            Rule::new("what can you do", |turn| {
                turn.say("I can do many things.");
                turn.say(listing());
                Flow::Handled
            })
            .on("^what can you do")?,
        )
        .rule(
            Rule::new("help", |turn| {
                turn.say("I can maybe help you.");
                turn.say(listing());
                Flow::Handled
            })
            .on("^help me?$")?,
        ))
}

/// A command rule: when `source` matches, `build` turns the utterance into
/// a host command. A `None` from `build` still takes the utterance, the
/// command just isn't sent.
fn command<F>(name: &'static str, source: &str, build: F) -> Result<Rule, ChatError>
where
    F: Fn(&Turn<'_>, &Pattern) -> Option<HostCommand> + Send + Sync + 'static,
{
    let anchor = Pattern::parse(source)?;
    let rule = Rule::new(name, move |turn| {
        match build(turn, &anchor) {
            Some(command) => turn.acknowledge(command),
            None => tracing::debug!(rule = name, "command matched without its parameters"),
        }
        Flow::Handled
    });
    Ok(rule.on(source)?)
}

fn named(turn: &Turn<'_>, anchor: &Pattern) -> Option<String> {
    text_after(turn.doc, anchor)
}

fn commands() -> Result<RuleGroup, ChatError> {
    let labelled_text = Pattern::parse("^(write|type) #Determiner? text")?;
    let group = RuleGroup::new("commands")
        .rule(command(
            "open model",
            "open (#Determiner|#Possessive)? sketchup? (model|file)",
            |_, _| Some(HostCommand::OpenModel),
        )?)
        .rule(command(
            "clean model",
            "clean (#Determiner|#Possessive)? sketchup? model",
            |_, _| Some(HostCommand::CleanModel),
        )?)
        .rule(command(
            "select first entity",
            "select #Determiner? first entity",
            |_, _| Some(HostCommand::SelectFirstEntity),
        )?)
        .rule(command(
            "select first group",
            "select #Determiner? first group",
            |_, _| Some(HostCommand::SelectFirstGroup),
        )?)
        .rule(command(
            "select groups named",
            "select #Determiner? (group|groups) named",
            |turn, anchor| named(turn, anchor).map(HostCommand::SelectGroupsNamed),
        )?)
        .rule(command(
            "select first component",
            "select #Determiner? first component",
            |_, _| Some(HostCommand::SelectFirstComponent),
        )?)
        .rule(command(
            "select components named",
            "select #Determiner? (component|components) named",
            |turn, anchor| named(turn, anchor).map(HostCommand::SelectComponentsNamed),
        )?)
        .rule(command(
            "move selection",
            "move #Determiner? selection",
            |turn, _| Some(HostCommand::MoveSelection(turn.slots.translation(turn.doc))),
        )?)
        .rule(command(
            "rotate selection",
            "rotate #Determiner? selection by",
            |turn, _| {
                turn.slots
                    .degrees(turn.doc)
                    .map(|degrees| HostCommand::RotateSelection { degrees })
            },
        )?)
        .rule(command(
            "scale selection",
            "increase #Determiner? selection size",
            |turn, _| {
                turn.slots
                    .times(turn.doc)
                    .map(|factor| HostCommand::ScaleSelection { factor })
            },
        )?)
        .rule(command(
            "rename selection",
            "(rename|name) #Determiner? selection (to|as)?",
            |turn, anchor| named(turn, anchor).map(HostCommand::RenameSelection),
        )?)
        .rule(command(
            "duplicate selection",
            "(duplicate|copy) #Determiner? selection (and|then)? (name|call) it",
            |turn, anchor| named(turn, anchor).map(HostCommand::CopySelection),
        )?)
        .rule(
            command(
                "clear selection",
                "clear #Determiner? selection",
                |_, _| Some(HostCommand::ClearSelection),
            )?
            .on("^deselect")?,
        )
        .rule(command(
            "erase selection",
            "(erase|delete|remove) #Determiner? (selection|selected)",
            |_, _| Some(HostCommand::EraseSelected),
        )?)
        .rule(command(
            "activate tool",
            "activate #Determiner? . .? tool",
            |turn, anchor| {
                let phrase = turn.doc.match_span(anchor).text(TextMode::Normal);
                Some(HostCommand::SendAction(turn.tools.action_id(&phrase)))
            },
        )?)
        .rule(command(
            "draw box",
            "draw #Pronoun? #Determiner? (cube|box)",
            |turn, _| {
                Some(HostCommand::DrawBox {
                    width: turn.slots.dimension(turn.doc, Dimension::Width),
                    depth: turn.slots.dimension(turn.doc, Dimension::Depth),
                    height: turn.slots.dimension(turn.doc, Dimension::Height),
                })
            },
        )?)
        .rule(command(
            "draw cone",
            "draw #Pronoun? #Determiner? cone",
            |turn, _| {
                Some(HostCommand::DrawCone {
                    radius: turn.slots.dimension(turn.doc, Dimension::Radius),
                    height: turn.slots.dimension(turn.doc, Dimension::Height),
                })
            },
        )?)
        .rule(command(
            "draw cylinder",
            "draw #Pronoun? #Determiner? cylinder",
            |turn, _| {
                Some(HostCommand::DrawCylinder {
                    radius: turn.slots.dimension(turn.doc, Dimension::Radius),
                    height: turn.slots.dimension(turn.doc, Dimension::Height),
                })
            },
        )?)
        .rule(command(
            "draw prism",
            "draw #Pronoun? #Determiner? prism",
            |turn, _| {
                Some(HostCommand::DrawPrism {
                    radius: turn.slots.dimension(turn.doc, Dimension::Radius),
                    height: turn.slots.dimension(turn.doc, Dimension::Height),
                    sides: turn.slots.sides(turn.doc).unwrap_or(PRISM_SIDES),
                })
            },
        )?)
        .rule(command(
            "draw pyramid",
            "draw #Pronoun? #Determiner? pyramid",
            |turn, _| {
                Some(HostCommand::DrawPyramid {
                    radius: turn.slots.dimension(turn.doc, Dimension::Radius),
                    height: turn.slots.dimension(turn.doc, Dimension::Height),
                    sides: turn.slots.sides(turn.doc).unwrap_or(PYRAMID_SIDES),
                })
            },
        )?)
        .rule(command(
            "draw sphere",
            "draw #Pronoun? #Determiner? sphere",
            |turn, _| {
                Some(HostCommand::DrawSphere {
                    radius: turn.slots.dimension(turn.doc, Dimension::Radius),
                })
            },
        )?)
        .rule(command("write text", "^(write|type)", move |turn, anchor| {
            let anchor = if turn.doc.has(&labelled_text) {
                &labelled_text
            } else {
                anchor
            };
            named(turn, anchor).map(HostCommand::WriteText)
        })?)
        .rule(command(
            "search extension",
            "search for #Pronoun? #Determiner? (plugin|plugins|extension|extensions) about",
            |turn, anchor| named(turn, anchor).map(HostCommand::SearchExtension),
        )?);
    Ok(group)
}

const PRISM_SIDES: u32 = 6;
const PYRAMID_SIDES: u32 = 4;

fn farewell() -> Result<RuleGroup, ChatError> {
    Ok(RuleGroup::new("farewell").rule(
        Rule::new("goodbye", |turn| {
            let goodbye = format!("Goodbye {}!", turn.user_name);
            turn.say(goodbye);
            turn.commands.push(HostCommand::CloseSession);
            Flow::Handled
        })
        .on("(goodbye|bye)")?
        .on("see you")?,
    ))
}

fn thanks() -> Result<RuleGroup, ChatError> {
    Ok(RuleGroup::new("thanks").rule(
        Rule::new("thanks", |turn| {
            turn.phrase(Phrase::Welcome);
            Flow::Handled
        })
        .on("(thanks|thx)")?
        .on("thank you")?,
    ))
}

fn agreement() -> Result<RuleGroup, ChatError> {
    Ok(RuleGroup::new("agreement").rule(
        Rule::new("thumbs up", |turn| {
            turn.say("👍");
            Flow::Handled
        })
        .on("(ok|okay|good|well)")?
        .on_blank(),
    ))
}
