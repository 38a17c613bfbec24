//! The single-page UI: one text input, one submit action, one output region.

/// Served at `GET /`. Submits to `POST /api/advice` and renders the
/// response text (or the error message) into the output region. Blank
/// input is rejected client-side before any request is made.
pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Medical Symptom Checker</title>
  <style>
    body { font-family: system-ui, sans-serif; max-width: 44rem; margin: 2rem auto; padding: 0 1rem; }
    textarea { width: 100%; height: 6rem; font: inherit; padding: 0.5rem; box-sizing: border-box; }
    button { margin-top: 0.5rem; padding: 0.5rem 1.25rem; font: inherit; cursor: pointer; }
    #output { margin-top: 1.5rem; white-space: pre-wrap; }
    .error { color: #b00020; }
  </style>
</head>
<body>
  <h1>Medical Symptom Checker</h1>
  <p>Enter your symptoms to get a condition prediction and suggestions, grounded in similar past cases.</p>
  <textarea id="symptoms" placeholder="e.g. fever, cough, chest pain"></textarea>
  <br>
  <button id="submit">Get Medical Advice</button>
  <div id="output"></div>
  <script>
    const output = document.getElementById('output');
    const button = document.getElementById('submit');
    button.addEventListener('click', async () => {
      const symptoms = document.getElementById('symptoms').value.trim();
      if (!symptoms) {
        output.className = 'error';
        output.textContent = 'Please enter some symptoms.';
        return;
      }
      button.disabled = true;
      output.className = '';
      output.textContent = 'Analyzing symptoms...';
      try {
        const res = await fetch('/api/advice', {
          method: 'POST',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify({ symptoms }),
        });
        const body = await res.json();
        if (res.ok) {
          output.textContent = body.advice;
        } else {
          output.className = 'error';
          output.textContent = body.error;
        }
      } catch (e) {
        output.className = 'error';
        output.textContent = 'Request failed: ' + e;
      } finally {
        button.disabled = false;
      }
    });
  </script>
</body>
</html>
"#;
