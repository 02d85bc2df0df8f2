//! Selects the union members that become generated variants

use smithy_sdk_generator_common::{MemberShape, Model, Result, Shape};
use tracing::debug;

/// Members of `union` that become variants, sorted by member name.
///
/// For event streams (`@streaming` unions), members targeting `@error`
/// structures are dropped: those events surface as exceptions while the
/// stream is consumed, not as values. Every kept member's target must exist.
pub fn filter_qualifying_members<'a>(
    union: &'a Shape,
    model: &Model,
) -> Result<Vec<&'a MemberShape>> {
    let event_stream = union.is_event_stream();
    let mut qualifying = Vec::with_capacity(union.members.len());

    for member in &union.members {
        let target = model.expect_shape(&member.target)?;
        if event_stream && target.is_error() {
            debug!(
                union = %union.id,
                member = %member.name,
                "excluding event stream error member"
            );
            continue;
        }
        qualifying.push(member);
    }

    qualifying.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(qualifying)
}
