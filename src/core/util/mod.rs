pub mod value_util;
