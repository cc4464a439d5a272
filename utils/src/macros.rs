/// Creates an owned `String` from anything that
/// can be turned into one.
///
/// # Examples
/// ```
/// use tag_meta_utils::string;
///
/// let arch: String = string!("amd64");
/// assert_eq!(arch, "amd64");
/// ```
#[macro_export]
macro_rules! string {
    ($str:expr) => {
        ::std::string::String::from($str)
    };
}
