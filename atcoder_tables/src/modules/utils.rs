/// AtCoder's verdict for an accepted submission. Every other verdict (WA,
/// TLE, RE, CE, ...) counts as a failed attempt.
pub fn is_accepted(result: &str) -> bool {
    result == "AC"
}
