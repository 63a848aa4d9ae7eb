/*!
Miscellaneous items, presently just [log] targets.
*/

pub mod log;
