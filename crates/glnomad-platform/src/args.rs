//! `-name value` process parameters.

use glnomad_strings::stricmp;

/// Index of the parameter `name` in `args`, compared case-insensitively.
///
/// `args[0]` is the program name and is never matched. The last argument is
/// skipped as well, since a parameter there would have no value after it.
pub fn get_parm<S: AsRef<str>>(args: &[S], name: &str) -> Option<usize> {
    let end = args.len().saturating_sub(1);
    (1..end).find(|&i| stricmp(args[i].as_ref(), name).is_eq())
}

/// The argument following the parameter `name`.
pub fn parm_value<'a, S: AsRef<str>>(args: &'a [S], name: &str) -> Option<&'a str> {
    get_parm(args, name).map(|i| args[i + 1].as_ref())
}
