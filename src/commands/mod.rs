pub type CmdResult<T> = acf_rename::Result<(T, i32)>;

pub mod rename;
