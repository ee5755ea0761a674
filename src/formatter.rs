//! Formatter Module
//!
//! 行データの各フィールドに適用する文字列変換を提供するモジュール。
//! すべて純粋関数で、入力が不正な場合はエラーではなく空文字列を返します
//! （空文字列は「未入力」として扱われます）。

use unicode_normalization::UnicodeNormalization;

/// 女性形序数の記号（例: `1ª`）
pub const FEMININE_ORDINAL: char = 'ª';

/// 前後の空白を除去して大文字化する
///
/// # 使用例
///
/// ```rust
/// assert_eq!(pautazero::upper("  pleno "), "PLENO");
/// ```
pub fn upper(value: &str) -> String {
    value.trim().to_uppercase()
}

/// 名前を比較用に正規化する
///
/// 前後の空白を除去し、大文字化したうえでNFD分解し、
/// 結合用ダイアクリティカルマーク（U+0300〜U+036F）を取り除きます。
/// 関係者名簿との照合にのみ使用し、グループ化のキーには使用しません。
///
/// ```rust
/// assert_eq!(pautazero::normalize_name(" Dirceu Rodolfo de Melo Júnior"), "DIRCEU RODOLFO DE MELO JUNIOR");
/// ```
pub fn normalize_name(value: &str) -> String {
    value
        .trim()
        .to_uppercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

/// ISO形式の日付（`YYYY-MM-DD`）を`DD/MM/YYYY`に変換する
///
/// `-`で分割した先頭3要素を年・月・日として扱います。
/// いずれかの要素が欠けている場合は空文字列を返します。
/// 暦としての妥当性は検証しません。
///
/// # 引数
///
/// * `iso_date` - `YYYY-MM-DD`形式の日付文字列
///
/// # 戻り値
///
/// `DD/MM/YYYY`形式の文字列、または空文字列
pub fn format_date_local(iso_date: &str) -> String {
    if iso_date.is_empty() {
        return String::new();
    }

    let mut parts = iso_date.split('-');
    let (year, month, day) = match (parts.next(), parts.next(), parts.next()) {
        (Some(y), Some(m), Some(d)) => (y, m, d),
        _ => return String::new(),
    };

    if year.is_empty() || month.is_empty() || day.is_empty() {
        return String::new();
    }

    format!("{}/{}/{}", day, month, year)
}

/// 文字列を数値に変換して女性形序数を付与する
///
/// 空文字列は0として扱います。数値として解釈できない場合、
/// 有限でない場合、1未満の場合は空文字列を返します。
///
/// ```rust
/// assert_eq!(pautazero::ordinal_suffix("3"), "3ª");
/// assert_eq!(pautazero::ordinal_suffix("0"), "");
/// ```
pub fn ordinal_suffix(value: &str) -> String {
    let trimmed = value.trim();
    let number = if trimmed.is_empty() {
        0.0
    } else {
        trimmed.parse::<f64>().unwrap_or(f64::NAN)
    };
    ordinal_suffix_f64(number)
}

/// 数値に女性形序数を付与する（小数部は切り捨て）
pub fn ordinal_suffix_f64(number: f64) -> String {
    if !number.is_finite() || number < 1.0 {
        return String::new();
    }
    format!("{}{}", number.trunc(), FEMININE_ORDINAL)
}

/// 複数行のセル値を、空白除去済みの空でない行のリストに分割する
///
/// `\n`と`\r\n`のどちらの改行にも対応します。
pub fn split_lines(value: &str) -> Vec<String> {
    value
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// ファイル名として安全な文字列に変換する
///
/// `\ / : * ? " < > |`の連続を`_`に、空白の連続を`_`に置き換えます。
pub fn safe_filename(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut in_forbidden = false;
    let mut in_space = false;

    for c in value.trim().chars() {
        if matches!(c, '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|') {
            if !in_forbidden {
                result.push('_');
            }
            in_forbidden = true;
            in_space = false;
        } else if c.is_whitespace() {
            if !in_space {
                result.push('_');
            }
            in_space = true;
            in_forbidden = false;
        } else {
            result.push(c);
            in_forbidden = false;
            in_space = false;
        }
    }

    result
}
