use crate::{errors::ArgumentError, slot::ValueKind, state::ParseState};

/**
Write everything a [`ParseState`] has buffered into the destination.

Named arguments are bound in declaration order, then the default argument.
A required argument that was never seen is an error, and stops the binding
right there; arguments before it are already bound. Arrays are always
replaced, so an array whose argument never appeared ends up empty. Every
other argument that was never seen leaves its field untouched.
*/
pub fn finish<D>(state: ParseState<'_, D>, destination: &mut D) -> Result<(), ArgumentError> {
    state
        .named
        .into_iter()
        .chain(state.default)
        .try_for_each(|value| {
            let (spec, seen, buffer) = value.into_parts();
            let name = spec.long_name();

            if !seen {
                if spec.is_required() {
                    return Err(ArgumentError::Missing {
                        name: name.to_owned(),
                    });
                }

                if spec.kind() != ValueKind::Array {
                    return Ok(());
                }
            }

            tracing::trace!(argument = name, "binding");

            buffer
                .bind(destination)
                .map_err(|source| ArgumentError::NotSupported {
                    name: name.to_owned(),
                    source,
                })
        })
}
