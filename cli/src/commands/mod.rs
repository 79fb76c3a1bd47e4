mod entry;
mod helpers;
mod list;
mod log;

pub(crate) use entry::{cmd_delete, cmd_resort, cmd_show};
pub(crate) use list::{SortArg, cmd_list};
pub(crate) use log::{LogArgs, cmd_log};
