//! Text form and copying of indicator constraints.
//!
//! A constraint prints as `<y> = 1 -> <s> = 0`; a negated binary prints
//! as its original with `= 0`.

use super::{CopyMap, IndicatorHandler};
use crate::cons::ConsId;
use crate::error::{IndicatorError, IndicatorResult};
use crate::model::{Model, VarStatus};

const SLACK_PREFIX: &str = "indslack";
const LINCONS_PREFIX: &str = "indlin";

/// Split `<name> rest` into `(name, rest)`.
fn take_var_name(text: &str) -> IndicatorResult<(&str, &str)> {
    let text = text.trim_start();
    let inner = text
        .strip_prefix('<')
        .ok_or_else(|| IndicatorError::Parse(format!("expected '<' at: {}", text)))?;
    let end = inner
        .find('>')
        .ok_or_else(|| IndicatorError::Parse(format!("unterminated variable name: {}", text)))?;
    Ok((&inner[..end], &inner[end + 1..]))
}

/// Split `= value rest` into `(value, rest)`.
fn take_value(text: &str) -> IndicatorResult<(i32, &str)> {
    let text = text
        .trim_start()
        .strip_prefix('=')
        .ok_or_else(|| IndicatorError::Parse(format!("expected '=' at: {}", text.trim_start())))?
        .trim_start();
    let end = text.find(|ch: char| !ch.is_ascii_digit()).unwrap_or(text.len());
    let value = text[..end]
        .parse::<i32>()
        .map_err(|e| IndicatorError::Parse(format!("invalid value '{}': {}", &text[..end], e)))?;
    Ok((value, &text[end..]))
}

impl IndicatorHandler {
    pub(super) fn print_cons(&self, model: &Model, c: usize) -> String {
        let cons = &self.conss[c];
        let (bin_name, value) = match model.var(cons.binvar).status {
            VarStatus::Negated(orig) => (&model.var(orig).name, 0),
            _ => (&model.var(cons.binvar).name, 1),
        };
        format!("<{}> = {} -> <{}> = 0", bin_name, value, model.var(cons.slackvar).name)
    }

    pub(super) fn parse_cons(&mut self, model: &mut Model, name: &str, text: &str) -> IndicatorResult<ConsId> {
        let (bin_name, rest) = take_var_name(text)?;
        let (value, rest) = take_value(rest)?;
        let rest = rest
            .trim_start()
            .strip_prefix("->")
            .ok_or_else(|| IndicatorError::Parse(format!("expected '->' in: {}", text)))?;
        let (slack_name, rest) = take_var_name(rest)?;
        let (slack_value, rest) = take_value(rest)?;
        if !rest.trim().is_empty() {
            return Err(IndicatorError::Parse(format!("trailing input: {}", rest.trim())));
        }
        if slack_value != 0 {
            return Err(IndicatorError::Parse(format!(
                "slack must be fixed to 0, got {}",
                slack_value
            )));
        }

        let mut binvar = model
            .find_var(bin_name)
            .ok_or_else(|| IndicatorError::Parse(format!("unknown variable <{}>", bin_name)))?;
        binvar = match value {
            1 => binvar,
            0 => model.negated(binvar),
            v => {
                return Err(IndicatorError::Parse(format!(
                    "indicator value must be 0 or 1, got {}",
                    v
                )))
            }
        };
        let slackvar = model
            .find_var(slack_name)
            .ok_or_else(|| IndicatorError::Parse(format!("unknown variable <{}>", slack_name)))?;

        let pos = slack_name.find(SLACK_PREFIX).ok_or_else(|| {
            IndicatorError::Parse(format!(
                "slack name <{}> does not contain '{}'",
                slack_name, SLACK_PREFIX
            ))
        })?;
        let lincons_name = format!("{}{}", LINCONS_PREFIX, &slack_name[pos + SLACK_PREFIX.len()..]);
        let lincons = model
            .find_lincons(&lincons_name)
            .ok_or_else(|| IndicatorError::Parse(format!("unknown linear constraint <{}>", lincons_name)))?;

        self.create_indicator_lincons(model, name, binvar, lincons, slackvar)
    }

    pub(super) fn copy_cons(
        &mut self,
        model: &mut Model,
        source: &Self,
        cons: ConsId,
        map: &CopyMap,
        name: Option<&str>,
    ) -> IndicatorResult<Option<ConsId>> {
        let src = source.get(cons)?;
        let binvar = map.vars.get(&src.binvar);
        let slackvar = map.vars.get(&src.slackvar);
        let lincons = map.linconss.get(&src.lincons);
        let (binvar, slackvar, lincons) = match (binvar, slackvar, lincons) {
            (Some(&b), Some(&s), Some(&l)) => (b, s, l),
            _ => {
                log::info!("could not copy linear constraint of indicator <{}>", src.name);
                return Ok(None);
            }
        };
        let name = name.unwrap_or(&src.name);
        self.create_indicator_lincons(model, name, binvar, lincons, slackvar).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::ConstraintHandler;
    use crate::model::VarType;
    use crate::settings::IndicatorSettings;

    fn setup() -> (Model, IndicatorHandler, ConsId) {
        let mut model = Model::new();
        let y = model.add_var("y", VarType::Binary, 0.0, 1.0, 0.0);
        let x = model.add_var("x", VarType::Continuous, 0.0, 10.0, 0.0);
        let mut handler = IndicatorHandler::new(IndicatorSettings::default()).unwrap();
        let c = handler
            .create_indicator(&mut model, "c", y, &[x], &[1.0], 5.0)
            .unwrap()
            .unwrap();
        (model, handler, c)
    }

    #[test]
    fn test_print() {
        let (mut model, mut handler, c) = setup();
        assert_eq!(handler.print(&model, c), "<y> = 1 -> <indslack_c> = 0");

        let y = model.find_var("y").unwrap();
        let ny = model.negated(y);
        let x = model.find_var("x").unwrap();
        let c2 = handler
            .create_indicator(&mut model, "d", ny, &[x], &[1.0], 2.0)
            .unwrap()
            .unwrap();
        assert_eq!(handler.print(&model, c2), "<y> = 0 -> <indslack_d> = 0");
    }

    #[test]
    fn test_parse_printed_form() {
        let (mut model, mut handler, c) = setup();
        let text = handler.print(&model, c);
        let parsed = handler.parse(&mut model, "p", &text).unwrap();

        let orig = handler.get(c).unwrap().clone();
        let cons = handler.get(parsed).unwrap();
        assert_eq!(cons.name, "p");
        assert_eq!(cons.binvar, orig.binvar);
        assert_eq!(cons.slackvar, orig.slackvar);
        assert_eq!(cons.lincons, orig.lincons);
    }

    #[test]
    fn test_parse_negated() {
        let (mut model, mut handler, _) = setup();
        let parsed = handler
            .parse(&mut model, "n", "<y> = 0 -> <indslack_c> = 0")
            .unwrap();
        let y = model.find_var("y").unwrap();
        let binvar = handler.get(parsed).unwrap().binvar;
        assert_eq!(model.var(binvar).status, VarStatus::Negated(y));
    }

    #[test]
    fn test_parse_errors() {
        let (mut model, mut handler, _) = setup();
        for text in [
            "<y> = 2 -> <indslack_c> = 0",
            "<z> = 1 -> <indslack_c> = 0",
            "<y> = 1 <indslack_c> = 0",
            "<y> = 1 -> <x> = 0",
            "<y = 1 -> <indslack_c> = 0",
            "<y> = 1 -> <indslack_c> = 1",
        ] {
            assert!(
                matches!(handler.parse(&mut model, "e", text), Err(IndicatorError::Parse(_))),
                "accepted: {}",
                text
            );
        }
    }

    #[test]
    fn test_copy() {
        let (_, source, c) = setup();
        let mut target = Model::new();
        let y = target.add_var("y", VarType::Binary, 0.0, 1.0, 0.0);
        let x = target.add_var("x", VarType::Continuous, 0.0, 10.0, 0.0);
        let s = target.add_var("s", VarType::Continuous, 0.0, 1e20, 0.0);
        let lincons = target
            .add_linear("lin", &[x, s], &[1.0, -1.0], -1e20, 5.0)
            .unwrap();

        let src = source.get(c).unwrap();
        let mut map = CopyMap::default();
        map.vars.insert(src.binvar, y);
        map.vars.insert(src.slackvar, s);

        let mut handler = IndicatorHandler::new(IndicatorSettings::default()).unwrap();
        let copied = handler.copy(&mut target, &source, c, &map, None).unwrap();
        assert!(copied.is_none());

        map.linconss.insert(src.lincons, lincons);
        let copied = handler
            .copy(&mut target, &source, c, &map, Some("copy"))
            .unwrap()
            .unwrap();
        let cons = handler.get(copied).unwrap();
        assert_eq!(cons.name, "copy");
        assert_eq!((cons.binvar, cons.slackvar, cons.lincons), (y, s, lincons));
    }
}
