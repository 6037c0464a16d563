/// Byte offset within `line` of the given UTF-16 column (the protocol's unit).
pub fn utf16_col_to_byte_col(line: &str, utf16_col: usize) -> usize {
    let mut curr_utf16 = 0;
    let mut curr_byte = 0;

    for c in line.chars() {
        if curr_utf16 >= utf16_col {
            break;
        }
        curr_utf16 += c.len_utf16();
        curr_byte += c.len_utf8();
    }
    curr_byte
}

/// UTF-16 column of a byte offset within `line`.
pub fn byte_col_to_utf16_col(line: &str, byte_col: usize) -> usize {
    line[..byte_col.min(line.len())]
        .chars()
        .map(char::len_utf16)
        .sum()
}

pub fn utf16_len(text: &str) -> u32 {
    text.chars().map(|c| c.len_utf16() as u32).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf16_columns_account_for_wide_characters() {
        let line = "$x = 'é😀' $lib.print";
        let byte = utf16_col_to_byte_col(line, 11);
        assert_eq!(&line[byte..byte + 1], "$");
        assert_eq!(byte_col_to_utf16_col(line, byte), 11);
    }

    #[test]
    fn columns_past_the_end_clamp() {
        assert_eq!(utf16_col_to_byte_col("abc", 10), 3);
        assert_eq!(byte_col_to_utf16_col("abc", 10), 3);
    }
}
